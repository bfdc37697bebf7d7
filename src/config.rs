//! Configuration module for environment variables and application settings

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use std::env;

/// Global application configuration loaded from environment variables
pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Authentication configuration
    pub auth: AuthConfig,

    /// Server configuration
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC signing secret for session tokens. Rotating it
    /// invalidates every outstanding token.
    pub jwt_secret: String,
    /// Interval between revocation-store sweeps, in seconds
    pub sweep_interval_secs: u64,
    /// Username of the admin account seeded at startup
    pub admin_username: String,
    /// Initial password of the seeded admin account
    pub admin_password: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| anyhow!("JWT_SECRET environment variable is required"))?,
                sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                    .unwrap_or_else(|_| "86400".to_string())
                    .parse()
                    .unwrap_or(86_400),
                admin_username: env::var("ADMIN_USERNAME")
                    .unwrap_or_else(|_| "admin".to_string()),
                admin_password: env::var("ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "placement-admin".to_string()),
            },

            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
        })
    }
}
