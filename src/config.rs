//! TOML configuration.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working local setup. See [`load_config`] for validation rules.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//! mcp_http = true
//!
//! [store]
//! seed = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Mount the MCP streamable HTTP endpoint at `/mcp`.
    #[serde(default = "default_mcp_http")]
    pub mcp_http: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            mcp_http: default_mcp_http(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_mcp_http() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// Populate the store with the pantry staples at startup.
    #[serde(default)]
    pub seed: bool,
}

impl Config {
    /// Validate values that serde alone cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "server.bind must be a socket address like 127.0.0.1:8080, got '{}'",
                self.server.bind
            );
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    Ok(config)
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert!(cfg.server.mcp_http);
        assert!(!cfg.store.seed);
    }

    #[test]
    fn test_full_config() {
        let cfg = parse_config(
            r#"
[server]
bind = "0.0.0.0:9000"
mcp_http = false

[store]
seed = true
"#,
        )
        .unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:9000");
        assert!(!cfg.server.mcp_http);
        assert!(cfg.store.seed);
    }

    #[test]
    fn test_invalid_bind_rejected() {
        let err = parse_config("[server]\nbind = \"localhost\"\n").unwrap_err();
        assert!(err.to_string().contains("server.bind"));
    }

    #[test]
    fn test_unknown_types_rejected() {
        assert!(parse_config("[store]\nseed = \"yes\"\n").is_err());
    }
}
