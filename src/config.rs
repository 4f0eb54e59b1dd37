//! Server configuration

use serde::Deserialize;

use crate::coordinate::CoordinateSystem;
use crate::error::{Error, Result};

pub const BIND_ENV: &str = "COORDKIT_BIND";
pub const BODY_LIMIT_ENV: &str = "COORDKIT_BODY_LIMIT";
pub const SYSTEM_ENV: &str = "COORDKIT_SYSTEM";
pub const LOG_ENV: &str = "COORDKIT_LOG";

/// Settings for the HTTP service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Request body limit in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,

    /// Notation used when a request names none
    #[serde(default)]
    pub default_system: CoordinateSystem,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_body_limit() -> usize {
    100 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            body_limit: default_body_limit(),
            default_system: CoordinateSystem::default(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `COORDKIT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind_addr) = lookup(BIND_ENV) {
            config.bind_addr = bind_addr;
        }

        if let Some(limit) = lookup(BODY_LIMIT_ENV) {
            config.body_limit = limit.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a byte count, got {:?}", BODY_LIMIT_ENV, limit))
            })?;
        }

        if let Some(system) = lookup(SYSTEM_ENV) {
            config.default_system = system.parse()?;
        }

        if let Some(level) = lookup(LOG_ENV) {
            config.log_level = level;
        }

        Ok(config)
    }
}
