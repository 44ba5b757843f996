//! Gateway configuration.
//!
//! A small serde-backed config (base URL and request timeout) with JSON
//! file loading. Defaults point at a local development server.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Connection settings for the remote CampusMap API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base API URL, e.g. `https://api.example.edu/api`.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading gateway config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing gateway config from {}", path.display()))?;
        Ok(config)
    }

    /// Base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: GatewayConfig = serde_json::from_str(r#"{"base_url":"https://x/api/"}"#).unwrap();
        assert_eq!(config.normalized_base_url(), "https://x/api");
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"base_url":"https://api.campus.test","timeout_ms":5000}}"#).unwrap();

        let config = GatewayConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://api.campus.test");
        assert_eq!(config.timeout_ms, 5000);
    }
}
