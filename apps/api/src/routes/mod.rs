pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

/// Multipart framing allowance on top of `max_upload_bytes`. The handler enforces the file limit.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/upload", post(handlers::handle_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
    use crate::resume::ner::HeuristicRecognizer;
    use crate::resume::parser::ResumeParser;
    use crate::resume::skills::SkillsCatalog;

    pub(crate) fn test_state(max_upload_bytes: usize) -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "debug".to_string(),
                max_upload_bytes,
                ner_enabled: true,
                skills_catalog_path: None,
            },
            parser: ResumeParser::new(
                SkillsCatalog::builtin(),
                Some(Arc::new(HeuristicRecognizer)),
            ),
        }
    }

    pub(crate) async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let (status, body) = send(test_state(DEFAULT_MAX_UPLOAD_BYTES), get_request("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Resume Parser API");
        assert!(body["endpoints"]["/upload"].is_string());
    }

    #[tokio::test]
    async fn test_health_reports_capabilities() {
        let (status, body) =
            send(test_state(DEFAULT_MAX_UPLOAD_BYTES), get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name_recognition"], true);
        assert!(body["skills_catalog_size"].as_u64().unwrap() > 0);
    }
}
