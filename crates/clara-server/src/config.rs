use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use clara_limiter::LimiterConfig;

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub public_rate: RateSettings,
    pub admin_rate: RateSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().unwrap(),
            public_rate: RateSettings::from(LimiterConfig::public_default()),
            admin_rate: RateSettings::from(LimiterConfig::admin_default()),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing keys fall back to the
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Apply environment overrides on top of the loaded configuration:
    /// `CLARA_BIND` for the bind address, `CLARA_PUBLIC_RATE_ENABLED` and
    /// `CLARA_ADMIN_RATE_ENABLED` for the limiter switches.
    pub fn apply_env(&mut self) -> ServerResult<()> {
        self.apply_vars(std::env::vars())
    }

    fn apply_vars(
        &mut self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> ServerResult<()> {
        for (key, value) in vars {
            match key.as_str() {
                "CLARA_BIND" => {
                    self.bind_addr = value.parse().map_err(|_| {
                        ServerError::Config(format!("invalid CLARA_BIND address: {value}"))
                    })?;
                }
                "CLARA_PUBLIC_RATE_ENABLED" => {
                    self.public_rate.enabled = parse_switch(&key, &value)?;
                }
                "CLARA_ADMIN_RATE_ENABLED" => {
                    self.admin_rate.enabled = parse_switch(&key, &value)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn parse_switch(key: &str, value: &str) -> ServerResult<bool> {
    match value {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        other => Err(ServerError::Config(format!(
            "invalid {key} value: {other}"
        ))),
    }
}

/// One admission-control window, in file-friendly units.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RateSettings {
    pub max_requests: usize,
    pub window_secs: u64,
    pub enabled: bool,
}

impl RateSettings {
    pub fn to_limiter(&self) -> LimiterConfig {
        LimiterConfig {
            max_requests: self.max_requests,
            window: Duration::from_secs(self.window_secs),
            enabled: self.enabled,
        }
    }
}

impl Default for RateSettings {
    fn default() -> Self {
        Self::from(LimiterConfig::public_default())
    }
}

impl From<LimiterConfig> for RateSettings {
    fn from(config: LimiterConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window_secs: config.window.as_secs(),
            enabled: config.enabled,
        }
    }
}
