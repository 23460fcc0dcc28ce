//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Public endpoint used by the googletrans family of clients
pub const DEFAULT_SERVICE_URL: &str = "https://translate.googleapis.com";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub service_url: String,
    pub client: String,
    pub user_agent: String,
    pub timeout_ms: u64,
    pub max_colwidth: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            client: "gtx".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: 30000,
            max_colwidth: 300,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let service_url = std::env::var("TRANSLATE_HOST").unwrap_or(defaults.service_url);

        let user_agent = std::env::var("TRANSLATE_USER_AGENT").unwrap_or(defaults.user_agent);

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()?;

        let max_colwidth = std::env::var("MAX_COLWIDTH")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<usize>()?;

        Ok(Self {
            service_url,
            client: defaults.client,
            user_agent,
            timeout_ms,
            max_colwidth,
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.service_url.is_empty() {
            return Err(anyhow::anyhow!("Service URL is required"));
        }

        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "Service URL must start with http:// or https://, got {}",
                self.service_url
            ));
        }

        if self.client.is_empty() {
            return Err(anyhow::anyhow!("Client identifier is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.max_colwidth < 4 {
            warn!("max_colwidth {} leaves no room for cell text", self.max_colwidth);
        }

        Ok(())
    }

    /// Endpoint for the single-text translate call
    pub fn endpoint(&self) -> String {
        format!("{}/translate_a/single", self.service_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = TranslatorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let config = TranslatorConfig {
            service_url: "translate.googleapis.com".to_string(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = TranslatorConfig {
            timeout_ms: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = TranslatorConfig {
            service_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };

        assert_eq!(config.endpoint(), "http://localhost:8080/translate_a/single");
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = TranslatorConfig {
            timeout_ms: 5000,
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.timeout_ms, 5000);
        assert_eq!(loaded.service_url, DEFAULT_SERVICE_URL);
    }
}
