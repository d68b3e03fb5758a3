pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/analyze",
            post(handlers::handle_analyze_resume),
        )
        .route("/api/v1/jobs/match", post(handlers::handle_match_jobs))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::store::memory::MemoryStore;
    use crate::analysis::vocabulary::SkillVocabulary;
    use crate::config::Config;
    use crate::models::job::JobRequirement;

    const BOUNDARY: &str = "X-ANALYZER-BOUNDARY";

    fn app_with(store: MemoryStore, max_upload_bytes: usize) -> Router {
        app_with_store(Arc::new(store), max_upload_bytes)
    }

    fn app_with_store(store: Arc<MemoryStore>, max_upload_bytes: usize) -> Router {
        build_router(AppState {
            store,
            vocabulary: Arc::new(SkillVocabulary::default()),
            config: Config {
                database_url: "postgres://unused".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                max_upload_bytes,
                db_max_connections: 1,
                skills_file: None,
            },
        })
    }

    fn app(store: MemoryStore) -> Router {
        app_with(store, 1024 * 1024)
    }

    fn sample_jobs() -> Vec<JobRequirement> {
        vec![
            JobRequirement::new("Data Engineer", "Acme", "Python, SQL, AWS"),
            JobRequirement::new("Platform Engineer", "Nimbus", "Docker, Kubernetes"),
        ]
    }

    fn multipart_request(field: &str, file_name: &str, body: &str) -> Request<Body> {
        multipart_request_typed(field, file_name, "text/plain", body)
    }

    fn multipart_request_typed(
        field: &str,
        file_name: &str,
        content_type: &str,
        body: &str,
    ) -> Request<Body> {
        multipart_parts(&[(field, file_name, content_type, body.as_bytes())])
    }

    /// Builds an upload with one file part per `(field, file_name, content_type, body)`.
    fn multipart_parts(parts: &[(&str, &str, &str, &[u8])]) -> Request<Body> {
        let mut payload = Vec::new();
        for (field, file_name, content_type, body) in parts {
            payload.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\n\
                     Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            payload.extend_from_slice(body);
            payload.extend_from_slice(b"\r\n");
        }
        payload.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(payload))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(MemoryStore::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_upload_returns_ranked_matches() {
        let response = app(MemoryStore::with_jobs(sample_jobs()))
            .oneshot(multipart_request(
                "resume",
                "cv.txt",
                "Built pipelines in Python and SQL, shipped with Docker.",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["skills"], json!(["docker", "python", "sql"]));
        assert_eq!(body["notices"], json!([]));
        assert_eq!(body["matches"][0]["title"], "Data Engineer");
        assert_eq!(body["matches"][0]["match_percent"], 66.67);
        assert_eq!(body["matches"][0]["matching_skills_csv"], "python, sql");
        assert_eq!(body["matches"][1]["match_percent"], 50.0);
        assert!(body["resume_name"].as_str().unwrap().starts_with("Resume_"));
    }

    #[tokio::test]
    async fn test_analyze_pdf_upload() {
        let store = Arc::new(MemoryStore::with_jobs(sample_jobs()));
        let response = app_with_store(store.clone(), 1024 * 1024)
            .oneshot(multipart_parts(&[(
                "resume",
                "resume.pdf",
                "application/pdf",
                include_bytes!("../analysis/testdata/resume.pdf"),
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["skills"], json!(["docker", "python", "sql"]));
        assert_eq!(body["matches"][0]["title"], "Data Engineer");
        assert_eq!(store.saved()[0].skills, "docker,python,sql");
    }

    #[tokio::test]
    async fn test_analyze_duplicate_resume_field_is_bad_request() {
        let store = Arc::new(MemoryStore::with_jobs(sample_jobs()));
        let response = app_with_store(store.clone(), 1024 * 1024)
            .oneshot(multipart_parts(&[
                ("resume", "first.txt", "text/plain", b"Python"),
                ("resume", "second.txt", "text/plain", b"Docker"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_without_skills_reports_notice() {
        let response = app(MemoryStore::with_jobs(sample_jobs()))
            .oneshot(multipart_request("resume", "cv.txt", "Gardening and baking"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["notices"], json!(["no_skills_detected"]));
        assert_eq!(body["matches"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_missing_field_is_bad_request() {
        let response = app(MemoryStore::default())
            .oneshot(multipart_request("attachment", "cv.txt", "Python"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_unsupported_format_is_unprocessable() {
        let response = app(MemoryStore::default())
            .oneshot(multipart_request_typed(
                "resume",
                "cv.docx",
                "application/octet-stream",
                "PK",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["error"]["code"], "EXTRACTION_FAILED");
    }

    #[tokio::test]
    async fn test_analyze_oversized_upload_rejected() {
        let response = app_with(MemoryStore::default(), 16)
            .oneshot(multipart_request("resume", "cv.txt", &"python ".repeat(10)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_match_jobs_endpoint() {
        let response = app(MemoryStore::with_jobs(sample_jobs()))
            .oneshot(json_request(
                "/api/v1/jobs/match",
                json!({ "skills": ["Docker", "kubernetes", "cobol"] }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["skills"], json!(["docker", "kubernetes"]));
        assert_eq!(body["matches"][0]["title"], "Platform Engineer");
        assert_eq!(body["matches"][0]["match_percent"], 100.0);
        assert_eq!(body["matches"][1]["match_percent"], 0.0);
        assert_eq!(body["matches"][1]["matching_skills"], json!([]));
    }

    #[tokio::test]
    async fn test_match_jobs_store_down_is_service_unavailable() {
        let store = MemoryStore {
            fail_jobs: true,
            ..Default::default()
        };
        let response = app(store)
            .oneshot(json_request("/api/v1/jobs/match", json!({ "skills": ["python"] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["error"]["code"], "STORE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_list_skills() {
        let response = app(MemoryStore::default())
            .oneshot(Request::get("/api/v1/skills").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        let skills = body["skills"].as_array().unwrap();
        assert_eq!(skills.len(), SkillVocabulary::default().len());
        assert_eq!(skills[0], "angular");
    }
}
