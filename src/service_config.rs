// =============================================================================
// Service Configuration — JSON file with environment overrides
// =============================================================================
//
// Settings are read once at startup.  All fields carry `#[serde(default)]` so
// a partial (or missing) config file still yields a usable configuration.
//
// Precedence (lowest to highest):
//   1. built-in defaults
//   2. JSON file at $ARION_CONFIG_PATH (default `arion_config.json`)
//   3. $PORT and $ARION_BIND_HOST
// =============================================================================

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CONFIG_PATH_ENV: &str = "ARION_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "arion_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

// =============================================================================
// ServiceConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Interface to listen on.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on the `/calculate` request body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing or unreadable file is an error so the caller can fall back
    /// to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read service config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse service config from {}", path.display()))?;

        info!(path = %path.display(), port = config.port, "service config loaded");
        Ok(config)
    }

    /// Apply `PORT` / `ARION_BIND_HOST` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(
            std::env::var("PORT").ok().as_deref(),
            std::env::var("ARION_BIND_HOST").ok().as_deref(),
        )
    }

    fn apply_overrides(&mut self, port: Option<&str>, bind_host: Option<&str>) -> Result<()> {
        if let Some(raw) = port.map(str::trim).filter(|s| !s.is_empty()) {
            self.port = raw
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?;
        }
        if let Some(host) = bind_host.map(str::trim).filter(|s| !s.is_empty()) {
            self.bind_host = host.to_string();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.bind_host.trim().is_empty() {
            bail!("bind_host must not be empty");
        }
        if self.max_body_bytes == 0 {
            bail!("max_body_bytes must be greater than zero");
        }
        Ok(())
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.bind_host, "0.0.0.0");
        assert_eq!(cfg.port, 10000);
        assert_eq!(cfg.max_body_bytes, 2 * 1024 * 1024);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:10000");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: ServiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ServiceConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let cfg: ServiceConfig = serde_json::from_str(r#"{ "port": 8080 }"#).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bind_host, "0.0.0.0");
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut cfg = ServiceConfig::default();
        cfg.apply_overrides(Some("8123"), Some("127.0.0.1")).unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8123");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut cfg = ServiceConfig::default();
        cfg.apply_overrides(Some("  "), Some("")).unwrap();
        assert_eq!(cfg, ServiceConfig::default());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let mut cfg = ServiceConfig::default();
        assert!(cfg.apply_overrides(Some("not-a-port"), None).is_err());
        assert!(cfg.apply_overrides(Some("70000"), None).is_err());
    }

    #[test]
    fn validate_rejects_zero_body_limit() {
        let cfg = ServiceConfig { max_body_bytes: 0, ..ServiceConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(ServiceConfig::load("definitely/not/here.json").is_err());
    }

    #[test]
    fn load_reads_json_file() {
        let path = std::env::temp_dir().join(format!("arion_config_{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{ "bind_host": "127.0.0.1", "port": 9001 }"#).unwrap();
        let cfg = ServiceConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9001");
    }
}
