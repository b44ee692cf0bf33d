//! Authentication gate: issues HS256 credentials on login and verifies them on every protected request.
//! Credentials are never stored server-side; logout only tells the client to drop its copy.

use crate::config::AuthConfig;
use crate::error::AuthError;
use chrono::{DateTime, SubsecRound, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity bound into a credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub token: String,
    pub principal: Principal,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn validity(&self) -> chrono::Duration {
        self.expires_at - self.issued_at
    }
}

#[derive(Clone)]
pub struct AuthGate {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    principals: HashMap<String, String>,
    token_ttl: chrono::Duration,
    cookie_name: String,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is checked against the caller's clock in `authorize_at`
        validation.validate_exp = false;
        validation.leeway = 0;

        AuthGate {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            principals: config
                .principals
                .iter()
                .map(|p| (p.username.clone(), p.password.clone()))
                .collect(),
            token_ttl: config.token_ttl,
            cookie_name: config.cookie_name.clone(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        self.token_ttl
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        self.login_at(username, password, Utc::now())
    }

    /// Issue a credential valid for the configured window starting at `now`.
    pub fn login_at(&self, username: &str, password: &str, now: DateTime<Utc>) -> Result<Credential, AuthError> {
        match self.principals.get(username) {
            Some(expected) if expected == password => {}
            _ => {
                tracing::info!(username = %username, "login rejected");
                return Err(AuthError::BadLogin);
            }
        }

        let issued_at = now.trunc_subsecs(0);
        let expires_at = issued_at
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| AuthError::Signing("token expiry out of range".into()))?;
        let claims = Claims {
            sub: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        tracing::info!(username = %username, expires_at = %expires_at, "credential issued");
        Ok(Credential {
            token,
            principal: Principal {
                username: username.to_string(),
            },
            issued_at,
            expires_at,
        })
    }

    pub fn authorize(&self, token: Option<&str>) -> Result<Principal, AuthError> {
        self.authorize_at(token, Utc::now())
    }

    /// Verify signature and expiry of a presented token at `now`.
    pub fn authorize_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::Missing),
        };
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::Invalid(e.to_string()))?;
        if now.timestamp() >= data.claims.exp {
            return Err(AuthError::Invalid("credential expired".into()));
        }
        Ok(Principal {
            username: data.claims.sub,
        })
    }

    /// `Set-Cookie` value delivering `credential` as an HTTP-only cookie.
    pub fn issue_cookie(&self, credential: &Credential) -> String {
        format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
            self.cookie_name,
            credential.token,
            credential.validity().num_seconds()
        )
    }

    /// `Set-Cookie` value that makes the client discard its credential. The token itself stays
    /// valid until it expires.
    pub fn logout(&self) -> String {
        format!("{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax", self.cookie_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrincipalConfig;
    use chrono::{Duration, TimeZone};

    fn gate() -> AuthGate {
        AuthGate::new(&AuthConfig::single("test-secret", "admin", "hunter2"))
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn login_issues_one_hour_credential() {
        let cred = gate().login_at("admin", "hunter2", t0()).unwrap();
        assert_eq!(cred.principal.username, "admin");
        assert_eq!(cred.validity(), Duration::hours(1));
        assert_eq!(cred.issued_at, t0());
    }

    #[test]
    fn login_rejects_wrong_password_and_unknown_user() {
        assert_eq!(gate().login_at("admin", "nope", t0()), Err(AuthError::BadLogin));
        assert_eq!(gate().login_at("root", "hunter2", t0()), Err(AuthError::BadLogin));
        assert_eq!(gate().login_at("", "", t0()), Err(AuthError::BadLogin));
    }

    #[test]
    fn authorize_within_window() {
        let gate = gate();
        let cred = gate.login_at("admin", "hunter2", t0()).unwrap();
        let principal = gate
            .authorize_at(Some(&cred.token), t0() + Duration::seconds(3599))
            .unwrap();
        assert_eq!(principal.username, "admin");
    }

    #[test]
    fn authorize_rejects_at_expiry() {
        let gate = gate();
        let cred = gate.login_at("admin", "hunter2", t0()).unwrap();
        let err = gate.authorize_at(Some(&cred.token), t0() + Duration::hours(1)).unwrap_err();
        assert!(matches!(err, AuthError::Invalid(_)));
    }

    #[test]
    fn missing_token() {
        assert_eq!(gate().authorize_at(None, t0()), Err(AuthError::Missing));
        assert_eq!(gate().authorize_at(Some("  "), t0()), Err(AuthError::Missing));
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let other = AuthGate::new(&AuthConfig::single("other-secret", "admin", "hunter2"));
        let cred = other.login_at("admin", "hunter2", t0()).unwrap();
        assert!(matches!(gate().authorize_at(Some(&cred.token), t0()), Err(AuthError::Invalid(_))));
    }

    #[test]
    fn tampered_payload_is_invalid() {
        let mut config = AuthConfig::single("test-secret", "admin", "hunter2");
        config.principals.push(PrincipalConfig {
            username: "guest".into(),
            password: "guest".into(),
        });
        let gate = AuthGate::new(&config);
        let admin = gate.login_at("admin", "hunter2", t0()).unwrap();
        let guest = gate.login_at("guest", "guest", t0()).unwrap();

        let admin_parts: Vec<&str> = admin.token.split('.').collect();
        let guest_parts: Vec<&str> = guest.token.split('.').collect();
        let forged = format!("{}.{}.{}", guest_parts[0], admin_parts[1], guest_parts[2]);
        assert!(matches!(gate.authorize_at(Some(&forged), t0()), Err(AuthError::Invalid(_))));
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert!(matches!(gate().authorize_at(Some("not-a-jwt"), t0()), Err(AuthError::Invalid(_))));
    }

    #[test]
    fn multiple_principals() {
        let mut config = AuthConfig::single("s", "a", "1");
        config.principals.push(PrincipalConfig {
            username: "b".into(),
            password: "2".into(),
        });
        let gate = AuthGate::new(&config);
        let cred = gate.login_at("b", "2", t0()).unwrap();
        assert_eq!(gate.authorize_at(Some(&cred.token), t0()).unwrap().username, "b");
    }

    #[test]
    fn cookie_directives() {
        let gate = gate();
        let cred = gate.login_at("admin", "hunter2", t0()).unwrap();
        let set = gate.issue_cookie(&cred);
        assert!(set.starts_with(&format!("token={};", cred.token)));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Max-Age=3600"));
        assert!(gate.logout().contains("Max-Age=0"));
    }

    #[test]
    fn logout_does_not_revoke() {
        let gate = gate();
        let cred = gate.login_at("admin", "hunter2", t0()).unwrap();
        let _ = gate.logout();
        assert!(gate.authorize_at(Some(&cred.token), t0()).is_ok());
    }
}
