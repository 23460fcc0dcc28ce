//! Row-wise batch translation

use indicatif::ProgressBar;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::client::{GoogleTranslator, TranslationService};
use crate::core::errors::Result;
use crate::core::languages::LanguageCatalog;
use crate::core::models::{Translation, TranslationRequest};

/// Translates ordered sequences of texts, one service call per row
#[derive(Clone)]
pub struct BatchTranslator {
    service: Arc<dyn TranslationService>,
    catalog: &'static LanguageCatalog,
}

impl BatchTranslator {
    /// Create a batch translator over any translation service
    pub fn new(service: Arc<dyn TranslationService>) -> Self {
        Self {
            service,
            catalog: LanguageCatalog::global(),
        }
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(GoogleTranslator::from_env()?)))
    }

    /// Service used for each row
    pub fn service(&self) -> &dyn TranslationService {
        self.service.as_ref()
    }

    /// Catalog the language codes are checked against
    pub fn catalog(&self) -> &'static LanguageCatalog {
        self.catalog
    }

    /// Translate every text, preserving length and order
    pub async fn translate_all(&self, texts: &[String], src: &str, dest: &str) -> Result<Vec<String>> {
        self.translate_all_with_progress(texts, src, dest, &ProgressBar::hidden())
            .await
    }

    /// Translate every text, ticking `progress` once per finished row
    pub async fn translate_all_with_progress(
        &self,
        texts: &[String],
        src: &str,
        dest: &str,
        progress: &ProgressBar,
    ) -> Result<Vec<String>> {
        let translations = self
            .translate_all_detailed_with_progress(texts, src, dest, progress)
            .await?;
        Ok(translations.into_iter().map(|t| t.text).collect())
    }

    /// Translate every text, keeping the per-row detected source language
    pub async fn translate_all_detailed(
        &self,
        texts: &[String],
        src: &str,
        dest: &str,
    ) -> Result<Vec<Translation>> {
        self.translate_all_detailed_with_progress(texts, src, dest, &ProgressBar::hidden())
            .await
    }

    async fn translate_all_detailed_with_progress(
        &self,
        texts: &[String],
        src: &str,
        dest: &str,
        progress: &ProgressBar,
    ) -> Result<Vec<Translation>> {
        // Both codes are checked before the first row goes out
        let src = self.catalog.resolve_source(src)?;
        let dest = self.catalog.resolve_dest(dest)?;

        if texts.is_empty() {
            debug!("Empty batch, nothing to translate");
            return Ok(Vec::new());
        }

        info!("Translating {} rows ({} -> {})", texts.len(), src, dest);

        let mut translations = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            let request = TranslationRequest::new(text.as_str(), dest).with_source_lang(src);

            match self.translate_request(&request).await {
                Ok(translated) => {
                    translations.push(translated);
                    progress.inc(1);
                }
                Err(e) => {
                    warn!("Row {} failed after {} of {} rows: {}", i, translations.len(), texts.len(), e);
                    return Err(e);
                }
            }
        }

        Ok(translations)
    }

    /// Translate a single request
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<Translation> {
        self.service
            .translate(&request.text, &request.source_lang, &request.target_lang)
            .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::errors::TranslationError;
    use crate::core::models::Detection;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Offline service that upper-cases text and can fail at a given call
    #[derive(Default)]
    pub(crate) struct FakeService {
        pub calls: AtomicUsize,
        pub fail_at: Option<usize>,
    }

    #[async_trait]
    impl TranslationService for FakeService {
        async fn detect(&self, text: &str) -> Result<Detection> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let lang = if text.contains("Cerco") { "it" } else { "en" };
            Ok(Detection {
                lang: lang.to_string(),
                confidence: 0.9,
            })
        }

        async fn translate(&self, text: &str, src: &str, dest: &str) -> Result<Translation> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_at == Some(call) {
                return Err(TranslationError::ServiceUnavailable {
                    message: "connection refused".to_string(),
                });
            }
            let src = if src == crate::core::languages::AUTO {
                if text.contains("Cerco") { "it" } else { "en" }
            } else {
                src
            };
            Ok(Translation {
                text: format!("[{}] {}", dest, text.to_uppercase()),
                origin: text.to_string(),
                src: src.to_string(),
                dest: dest.to_string(),
                pronunciation: None,
            })
        }
    }

    fn sentences() -> Vec<String> {
        vec![
            "Police in France say they have seized 140,000 face masks.".to_string(),
            "Officers say they discovered the haul.".to_string(),
            "The news conference could be led on Monday.".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_preserves_length_and_order() {
        let service = Arc::new(FakeService::default());
        let batch = BatchTranslator::new(service.clone());

        let output = batch.translate_all(&sentences(), "en", "it").await.unwrap();

        assert_eq!(output.len(), 3);
        for (input, translated) in sentences().iter().zip(&output) {
            assert!(!translated.is_empty());
            assert!(translated.ends_with(&input.to_uppercase()));
        }
        assert_eq!(service.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_detailed_keeps_detected_source() {
        let batch = BatchTranslator::new(Arc::new(FakeService::default()));
        let texts = vec![
            "Cerco un centro di gravità permanente".to_string(),
            "Officers say they discovered the haul.".to_string(),
        ];

        let output = batch.translate_all_detailed(&texts, "auto", "en").await.unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].src, "it");
        assert_eq!(output[1].src, "en");
        assert!(output.iter().all(|t| !t.text.is_empty() && t.dest == "en"));
        assert!(LanguageCatalog::global().contains(&output[0].src));
        assert_eq!(output[0].origin, texts[0]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let service = Arc::new(FakeService::default());
        let batch = BatchTranslator::new(service.clone());

        let output = batch.translate_all(&[], "auto", "en").await.unwrap();

        assert!(output.is_empty());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_language_before_any_call() {
        let service = Arc::new(FakeService::default());
        let batch = BatchTranslator::new(service.clone());

        let err = batch.translate_all(&sentences(), "en", "xx").await.unwrap_err();
        assert!(matches!(err, TranslationError::UnsupportedLanguage { .. }));

        let err = batch.translate_all(&sentences(), "yy", "en").await.unwrap_err();
        assert!(matches!(err, TranslationError::UnsupportedLanguage { .. }));

        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_aborts_batch() {
        let service = Arc::new(FakeService {
            fail_at: Some(1),
            ..Default::default()
        });
        let batch = BatchTranslator::new(service.clone());

        let err = batch.translate_all(&sentences(), "en", "it").await.unwrap_err();

        assert!(matches!(err, TranslationError::ServiceUnavailable { .. }));
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_progress_ticks_per_row() {
        let batch = BatchTranslator::new(Arc::new(FakeService::default()));
        let progress = ProgressBar::hidden();

        batch
            .translate_all_with_progress(&sentences(), "auto", "it", &progress)
            .await
            .unwrap();

        assert_eq!(progress.position(), 3);
    }
}
