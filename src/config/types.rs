//! Process configuration types. Values come from the environment (see `loader`).

use std::net::SocketAddr;
use std::path::PathBuf;

/// One principal allowed to log in. Passwords are compared verbatim (no hashing in this design).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrincipalConfig {
    pub username: String,
    pub password: String,
}

/// Everything the authentication gate needs, passed explicitly into its constructor.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub secret: String,
    pub principals: Vec<PrincipalConfig>,
    /// Credential validity window from issuance.
    pub token_ttl: chrono::Duration,
    /// Cookie the credential is delivered in and read back from.
    pub cookie_name: String,
}

impl AuthConfig {
    pub const DEFAULT_COOKIE: &'static str = "token";

    /// Single-principal config with the default one hour window.
    pub fn single(secret: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        AuthConfig {
            secret: secret.into(),
            principals: vec![PrincipalConfig {
                username: username.into(),
                password: password.into(),
            }],
            token_ttl: chrono::Duration::hours(1),
            cookie_name: Self::DEFAULT_COOKIE.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Port of the front-end app; `http://localhost:{app_port}` is the allowed CORS origin.
    pub app_port: u16,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn cors_origin(&self) -> String {
        format!("http://localhost:{}", self.app_port)
    }

    /// URL advertised in the document's `servers` list.
    pub fn public_url(&self) -> String {
        format!("http://localhost:{}", self.bind_addr.port())
    }
}

/// Where model names and descriptor sources are read from at startup.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    /// JSON object whose top-level keys are the model names.
    pub schema_path: PathBuf,
    /// Directory of `{Model}.dto.ts` descriptor files.
    pub dto_dir: PathBuf,
}

#[derive(Clone, Debug)]
pub struct ScaffoldConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub sources: SourceConfig,
}
