//! Async client for the gtx translation endpoint

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::languages::{LanguageCatalog, AUTO};
use crate::core::models::{Detection, GtxResponse, Translation};

/// A service able to detect and translate single texts
#[async_trait]
pub trait TranslationService: Send + Sync {
    /// Detect the language of `text`
    async fn detect(&self, text: &str) -> Result<Detection>;

    /// Translate `text` from `src` (or `auto`) into `dest`
    async fn translate(&self, text: &str, src: &str, dest: &str) -> Result<Translation>;
}

/// Translator backed by `translate_a/single`
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
    catalog: &'static LanguageCatalog,
}

impl GoogleTranslator {
    /// Create a new translator
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| TranslationError::ConfigError {
                message: e.to_string(),
            })?;

        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            TranslationError::ConfigError {
                message: format!("Invalid user agent: {}", e),
            }
        })?;
        headers.insert(USER_AGENT, user_agent);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| TranslationError::ConfigError {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            config: Arc::new(config),
            catalog: LanguageCatalog::global(),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::from_env().map_err(|e| TranslationError::ConfigError {
            message: e.to_string(),
        })?;
        Self::new(config)
    }

    /// Configuration this translator was built with
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    fn query_params(&self, src: &str, dest: &str) -> Vec<(&'static str, String)> {
        vec![
            ("client", self.config.client.clone()),
            ("sl", src.to_string()),
            ("tl", dest.to_string()),
            ("dt", "t".to_string()),
            ("dt", "rm".to_string()),
            ("dj", "1".to_string()),
            ("ie", "UTF-8".to_string()),
            ("oe", "UTF-8".to_string()),
        ]
    }

    /// Send actual HTTP request
    async fn send_request(&self, text: &str, src: &str, dest: &str) -> Result<GtxResponse> {
        debug!("POST {} sl={} tl={} ({} chars)", self.config.endpoint(), src, dest, text.chars().count());

        let response = self
            .client
            .post(self.config.endpoint())
            .query(&self.query_params(src, dest))
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| TranslationError::ServiceUnavailable {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranslationError::ServiceUnavailable {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            let status_code = status.as_u16();

            if status_code == 429 {
                let (ip_address, time, url) = extract_block_page_info(&body);
                warn!("Rate limited by translation service (ip: {})", ip_address);
                return Err(TranslationError::RateLimited {
                    ip_address,
                    time,
                    url,
                });
            }

            return Err(TranslationError::ApiError {
                status: status_code,
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| TranslationError::InvalidResponse {
                message: e.to_string(),
            })?;

        if let Some(error) = json.get("error") {
            let message = error["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(TranslationError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(json).map_err(|e| TranslationError::InvalidResponse {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TranslationService for GoogleTranslator {
    async fn detect(&self, text: &str) -> Result<Detection> {
        let response = self.send_request(text, AUTO, "en").await?;

        let lang = response
            .detected_lang()
            .ok_or_else(|| TranslationError::InvalidResponse {
                message: "No detected language in response".to_string(),
            })?;

        Ok(Detection {
            confidence: response.detection_confidence(),
            lang,
        })
    }

    async fn translate(&self, text: &str, src: &str, dest: &str) -> Result<Translation> {
        let src = self.catalog.resolve_source(src)?;
        let dest = self.catalog.resolve_dest(dest)?;

        let response = self.send_request(text, src, dest).await?;

        let translated = response.translated_text();
        if translated.is_empty() && !text.trim().is_empty() {
            return Err(TranslationError::InvalidResponse {
                message: "No translation in response".to_string(),
            });
        }

        Ok(Translation {
            text: translated,
            origin: text.to_string(),
            src: response.detected_lang().unwrap_or_else(|| src.to_string()),
            dest: dest.to_string(),
            pronunciation: response.pronunciation(),
        })
    }
}

static IP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"IP address: (.+?)<br>").expect("valid regex"));
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Time: (.+?)<br>").expect("valid regex"));
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"URL: (.+?)<br>").expect("valid regex"));

/// Pull the IP address, time and URL out of the HTML block page
fn extract_block_page_info(html: &str) -> (String, String, String) {
    let capture = |re: &Regex| {
        re.captures(html)
            .map(|cap| cap[1].to_string())
            .unwrap_or_default()
    };

    (
        capture(&IP_RE),
        capture(&TIME_RE),
        capture(&URL_RE).replace("&amp;", "&"),
    )
}
