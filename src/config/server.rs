//! Server configuration

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment name
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path prefix of every API route
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Deadline for best-effort calls (notifications, metrics, media URLs)
    #[serde(default = "default_side_effect_timeout")]
    pub side_effect_timeout_ms: u64,
}

/// Application environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidHost)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn side_effect_timeout(&self) -> Duration {
        Duration::from_millis(self.side_effect_timeout_ms)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr()?;
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.side_effect_timeout_ms == 0
            || self.side_effect_timeout_ms > self.request_timeout_secs * 1000
        {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.api_version.trim_matches('/').is_empty() {
            return Err(ValidationError::MissingRequired("server.api_version"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            api_version: default_api_version(),
            request_timeout_secs: default_request_timeout(),
            side_effect_timeout_ms: default_side_effect_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,fiufit_users=debug,sqlx=warn".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_side_effect_timeout() -> u64 {
    2_000
}
