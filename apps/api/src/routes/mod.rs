pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analysis", post(handlers::handle_analysis))
        .route(
            "/api/v1/analysis/career-path",
            post(handlers::handle_career_path),
        )
        .route("/api/v1/analysis/github", post(handlers::handle_github))
        .route("/api/v1/analysis/linkedin", post(handlers::handle_linkedin))
        .route("/api/v1/analysis/resume", post(handlers::handle_resume))
        .route(
            "/api/v1/analysis/resume/upload",
            post(handlers::handle_resume_upload),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::facts::GitHubFacts;
    use crate::analysis::resources::StaticResourceProvider;
    use crate::analysis::AnalysisService;
    use crate::config::{Config, GitHubConfig, LlmConfig};
    use crate::github::{FetchError, MetadataSource};
    use crate::llm_client::{CompletionBackend, CompletionError, RawCompletion};

    struct Unavailable;

    #[async_trait]
    impl CompletionBackend for Unavailable {
        async fn complete(&self, _: &str, _: &str) -> Result<RawCompletion, CompletionError> {
            Err(CompletionError::BackendUnavailable("offline".to_string()))
        }
    }

    #[async_trait]
    impl MetadataSource for Unavailable {
        async fn github_facts(&self, _: &str) -> Result<GitHubFacts, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    fn app() -> Router {
        let config = Config {
            llm: LlmConfig {
                api_key: None,
                api_url: "http://127.0.0.1:9".to_string(),
                request_timeout: Duration::from_secs(1),
            },
            github: GitHubConfig {
                api_url: "http://127.0.0.1:9".to_string(),
                token: None,
                request_timeout: Duration::from_secs(1),
            },
            analysis_deadline: Duration::from_secs(5),
            completion_max_attempts: 1,
            port: 0,
            rust_log: "info".to_string(),
        };
        let analysis = AnalysisService::new(
            Arc::new(Unavailable),
            Arc::new(Unavailable),
            Arc::new(StaticResourceProvider),
            config.analysis_deadline,
            config.completion_max_attempts,
        );
        build_router(AppState {
            analysis: Arc::new(analysis),
            config,
        })
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["completionBackend"], false);
    }

    #[tokio::test]
    async fn test_career_path_without_backend_uses_fallback() {
        let (status, body) = post_json(
            "/api/v1/analysis/career-path",
            json!({"targetRole": "Data Scientist", "timeframe": "3 months", "pace": "intensive"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysisType"], "careerPath");
        assert_eq!(body["source"], "fallback");
        assert_eq!(body["result"]["weeklyPlan"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_generic_endpoint_dispatches_on_analysis_type() {
        let (status, body) = post_json(
            "/api/v1/analysis",
            json!({"analysisType": "githubProfile", "profileUrl": "https://github.com/octocat"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysisType"], "githubProfile");
        assert_eq!(body["result"]["profileType"], "github");
    }

    #[tokio::test]
    async fn test_linkedin_without_facts_is_validation_error() {
        let (status, body) = post_json(
            "/api/v1/analysis/linkedin",
            json!({"profileUrl": "https://www.linkedin.com/in/jo"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["error"]["missingFields"],
            json!(["headline", "experience", "skills"])
        );
    }

    #[tokio::test]
    async fn test_blank_resume_is_validation_error() {
        let (status, body) = post_json("/api/v1/analysis/resume", json!({"resumeText": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["missingFields"], json!(["resumeText"]));
    }

    #[tokio::test]
    async fn test_upload_without_pdf_text_is_unprocessable() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\nnot really a pdf\r\n--{boundary}--\r\n"
        );
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/analysis/resume/upload")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
