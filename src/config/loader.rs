//! Load [`ScaffoldConfig`] from environment variables.

use crate::config::types::*;
use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SECRET: &str = "default_secret";
pub const DEFAULT_SERVER_PORT: u16 = 20002;
pub const DEFAULT_APP_PORT: u16 = 10001;
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

impl ScaffoldConfig {
    /// Read config from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read config through `lookup` (key -> value). Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = var("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using built-in default secret");
            DEFAULT_SECRET.to_string()
        });
        let username = var("ADMIN_USERNAME").unwrap_or_else(|| "admin".into());
        let password = var("ADMIN_PASSWORD").unwrap_or_else(|| "admin".into());
        let ttl_secs: i64 = parse_or("TOKEN_TTL_SECS", var("TOKEN_TTL_SECS"), DEFAULT_TOKEN_TTL_SECS)?;
        if ttl_secs <= 0 {
            return Err(ConfigError::Env {
                key: "TOKEN_TTL_SECS",
                message: "must be positive".into(),
            });
        }

        let server_port: u16 = parse_or("SERVER_PORT", var("SERVER_PORT"), DEFAULT_SERVER_PORT)?;
        let app_port: u16 = parse_or("APP_PORT", var("APP_PORT"), DEFAULT_APP_PORT)?;
        let bind_ip: IpAddr = parse_or("BIND_ADDR", var("BIND_ADDR"), IpAddr::from([0, 0, 0, 0]))?;
        let body_limit_bytes: usize = parse_or("BODY_LIMIT_BYTES", var("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT)?;

        let mut auth = AuthConfig::single(secret, username, password);
        auth.token_ttl = chrono::Duration::seconds(ttl_secs);

        Ok(ScaffoldConfig {
            server: ServerConfig {
                bind_addr: SocketAddr::new(bind_ip, server_port),
                app_port,
                body_limit_bytes,
            },
            auth,
            sources: SourceConfig {
                schema_path: PathBuf::from(var("SCHEMA_PATH").unwrap_or_else(|| "schema/schema.parsed.json".into())),
                dto_dir: PathBuf::from(var("DTO_DIR").unwrap_or_else(|| "dto".into())),
            },
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.trim().parse().map_err(|e: T::Err| ConfigError::Env {
            key,
            message: format!("{:?}: {}", s, e),
        }),
    }
}
