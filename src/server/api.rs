//! HTTP API server implementation

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::batch::BatchTranslator;
use crate::core::client::TranslationService;
use crate::core::errors::TranslationError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    translator: BatchTranslator,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    time: chrono::DateTime<chrono::Utc>,
}

/// Languages list response
#[derive(Serialize)]
struct LanguagesResponse {
    object: String,
    data: Vec<LanguageInfo>,
}

#[derive(Serialize)]
struct LanguageInfo {
    code: String,
    name: String,
}

/// Detection request
#[derive(Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

/// Detection response
#[derive(Serialize)]
pub struct DetectResponse {
    pub lang: String,
    pub confidence: f32,
}

/// Batch translation request
#[derive(Deserialize)]
pub struct TranslateRequest {
    pub source_lang: Option<String>,
    pub target_lang: String,
    pub text_list: Vec<String>,
}

/// Batch translation response
#[derive(Serialize)]
pub struct TranslateResponse {
    pub translations: Vec<TranslationItem>,
}

#[derive(Serialize)]
pub struct TranslationItem {
    pub detected_source_lang: Option<String>,
    pub text: String,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

type ApiError = (StatusCode, axum::Json<ErrorResponse>);

fn error_response(err: &TranslationError) -> ApiError {
    let (status, code, kind) = match err {
        TranslationError::UnsupportedLanguage { .. } => {
            (StatusCode::BAD_REQUEST, "unsupported_language", "invalid_request_error")
        }
        TranslationError::RateLimited { .. } => {
            (StatusCode::TOO_MANY_REQUESTS, "rate_limited", "api_error")
        }
        _ => (StatusCode::BAD_GATEWAY, "translation_error", "api_error"),
    };

    (
        status,
        axum::Json(ErrorResponse {
            error: ErrorDetail {
                message: err.to_string(),
                code: Some(code.to_string()),
                r#type: Some(kind.to_string()),
            },
        }),
    )
}

/// Health check handler
async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        time: chrono::Utc::now(),
    })
}

/// Get languages handler
async fn get_languages(State(state): State<Arc<AppState>>) -> axum::Json<LanguagesResponse> {
    let data = state
        .translator
        .catalog()
        .iter()
        .map(|(code, name)| LanguageInfo {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect();

    axum::Json(LanguagesResponse {
        object: "list".to_string(),
        data,
    })
}

/// Detect handler
async fn detect(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DetectRequest>,
) -> Result<axum::Json<DetectResponse>, ApiError> {
    match state.translator.service().detect(&payload.text).await {
        Ok(detection) => Ok(axum::Json(DetectResponse {
            lang: detection.lang,
            confidence: detection.confidence,
        })),
        Err(e) => {
            warn!("Detection failed: {}", e);
            Err(error_response(&e))
        }
    }
}

/// Batch translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateRequest>,
) -> Result<axum::Json<TranslateResponse>, ApiError> {
    let source_lang = payload.source_lang.as_deref().unwrap_or("auto");

    match state
        .translator
        .translate_all_detailed(&payload.text_list, source_lang, &payload.target_lang)
        .await
    {
        Ok(results) => {
            let translations = results
                .into_iter()
                .map(|t| TranslationItem {
                    detected_source_lang: Some(t.src).filter(|src| !src.is_empty()),
                    text: t.text,
                })
                .collect();

            Ok(axum::Json(TranslateResponse { translations }))
        }
        Err(e) => {
            warn!("Translation failed: {}", e);
            Err(error_response(&e))
        }
    }
}

/// Build the API router
pub fn router(translator: BatchTranslator) -> Router {
    let state = Arc::new(AppState { translator });

    Router::new()
        .route("/", get(health_check))
        .route("/languages", get(get_languages))
        .route("/detect", post(detect))
        .route("/translate", post(translate))
        .with_state(state)
}

/// Bind a listener, resolving host names such as `localhost`
async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    // Accept "[::1]" as well as "::1"
    let host = host.trim_start_matches('[').trim_end_matches(']');
    TcpListener::bind((host, port)).await
}

/// Run the HTTP server
pub async fn run_server(translator: BatchTranslator, host: String, port: u16) -> anyhow::Result<()> {
    let app = router(translator);

    let listener = bind(&host, port).await?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::tests::FakeService;
    use assert_json_diff::assert_json_eq;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        router(BatchTranslator::new(Arc::new(FakeService::default())))
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = call(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_languages() {
        let request = Request::builder().uri("/languages").body(Body::empty()).unwrap();
        let (status, body) = call(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert!(data.iter().any(|l| l["code"] == "it" && l["name"] == "Italian"));
    }

    #[tokio::test]
    async fn test_translate_batch() {
        let request = post_json(
            "/translate",
            serde_json::json!({
                "source_lang": "en",
                "target_lang": "it",
                "text_list": ["one", "two"]
            }),
        );
        let (status, body) = call(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_json_eq!(
            body,
            serde_json::json!({
                "translations": [
                    {"detected_source_lang": "en", "text": "[it] ONE"},
                    {"detected_source_lang": "en", "text": "[it] TWO"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_translate_auto_reports_detected_source() {
        let request = post_json(
            "/translate",
            serde_json::json!({
                "target_lang": "en",
                "text_list": ["Cerco un centro di gravità permanente"]
            }),
        );
        let (status, body) = call(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_json_eq!(
            body,
            serde_json::json!({
                "translations": [
                    {"detected_source_lang": "it", "text": "[en] CERCO UN CENTRO DI GRAVITÀ PERMANENTE"}
                ]
            })
        );
    }

    #[tokio::test]
    async fn test_bind_resolves_host_names() {
        let listener = bind("localhost", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());

        let listener = bind("127.0.0.1", 0).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_translate_empty_list() {
        let request = post_json(
            "/translate",
            serde_json::json!({"target_lang": "en", "text_list": []}),
        );
        let (status, body) = call(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_json_eq!(body, serde_json::json!({"translations": []}));
    }

    #[tokio::test]
    async fn test_translate_unsupported_language() {
        let request = post_json(
            "/translate",
            serde_json::json!({"target_lang": "xx", "text_list": ["hello"]}),
        );
        let (status, body) = call(app(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "unsupported_language");
    }

    #[tokio::test]
    async fn test_detect() {
        let request = post_json(
            "/detect",
            serde_json::json!({"text": "Cerco un centro di gravità permanente"}),
        );
        let (status, body) = call(app(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lang"], "it");
    }
}
