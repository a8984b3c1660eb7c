pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analyze/compare", post(handlers::handle_compare))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisBackend, Config};
    use crate::screening::vocabulary::SkillVocabulary;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn local_router() -> Router {
        let state = AppState::build(Config::default(), SkillVocabulary::builtin().unwrap()).unwrap();
        build_router(state)
    }

    fn router_with_provider(url: String, backend: AnalysisBackend) -> Router {
        let config = Config {
            analysis_backend: backend,
            provider_url: Some(url),
            provider_timeout_secs: 5,
            ..Config::default()
        };
        build_router(AppState::build(config, SkillVocabulary::builtin().unwrap()).unwrap())
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn analysis_body() -> Value {
        json!({
            "jobDescription": "We need React, Node, AWS and Docker.",
            "resumeText": "React and Node developer, Docker daily, Redis caching.",
            "candidateName": "Ada",
            "roleTitle": "Full-stack Engineer",
            "recruiterEmail": "hr@example.com"
        })
    }

    fn remote_result() -> Value {
        json!({
            "candidateName": ["Ada"],
            "score": 85,
            "label": "Strong Recommend",
            "summary": "Excellent alignment.",
            "matchedSkills": ["react", "node", "docker"],
            "missingSkills": ["aws"]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(local_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "screener");
    }

    #[tokio::test]
    async fn test_list_skills_returns_vocabulary_in_order() {
        let request = Request::builder()
            .uri("/api/v1/skills")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(local_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"][0], "react");
        assert_eq!(body["skills"][1], "node");
        assert_eq!(body["count"], body["skills"].as_array().unwrap().len());
    }

    #[tokio::test]
    async fn test_analyze_with_local_backend() {
        let (status, body) = send(local_router(), post_json("/api/v1/analyze", analysis_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "local");
        assert!(body["analysisId"].is_string());
        assert!(body["analyzedAt"].is_string());

        let result = &body["result"];
        assert_eq!(result["candidateName"], "Ada");
        assert_eq!(result["roleTitle"], "Full-stack Engineer");
        assert_eq!(result["score"], 56);
        assert_eq!(result["label"], "Weak Fit");
        assert_eq!(result["matchedSkills"], json!(["react", "node", "docker"]));
        assert_eq!(result["missingSkills"], json!(["aws"]));
        assert_eq!(result["extraSkills"], json!(["redis"]));
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_resume() {
        let mut body = analysis_body();
        body["resumeText"] = json!("   ");
        let (status, body) = send(local_router(), post_json("/api/v1/analyze", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_rejects_oversized_input() {
        let config = Config {
            max_input_chars: 20,
            ..Config::default()
        };
        let router = build_router(AppState::build(config, SkillVocabulary::builtin().unwrap()).unwrap());
        let (status, body) = send(router, post_json("/api/v1/analyze", analysis_body())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("character limit"));
    }

    #[tokio::test]
    async fn test_analyze_with_remote_backend() {
        let server = MockServer::start().await;
        let encoded = remote_result().to_string();
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "output": encoded }])))
            .expect(1)
            .mount(&server)
            .await;

        let router = router_with_provider(server.uri(), AnalysisBackend::Remote);
        let (status, body) = send(router, post_json("/api/v1/analyze", analysis_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["backend"], "remote");
        assert_eq!(body["result"]["score"], 85);
        assert_eq!(body["result"]["candidateName"], "Ada");
        assert_eq!(body["result"]["extraSkills"], json!([]));
    }

    #[tokio::test]
    async fn test_analyze_surfaces_provider_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("workflow crashed"))
            .mount(&server)
            .await;

        let router = router_with_provider(server.uri(), AnalysisBackend::Remote);
        let (status, body) = send(router, post_json("/api/v1/analyze", analysis_body())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "PROVIDER_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("workflow crashed"));
    }

    #[tokio::test]
    async fn test_analyze_surfaces_malformed_provider_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "label": "Consider" })))
            .mount(&server)
            .await;

        let router = router_with_provider(server.uri(), AnalysisBackend::Remote);
        let (status, body) = send(router, post_json("/api/v1/analyze", analysis_body())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MALFORMED_PROVIDER_RESPONSE");
    }

    #[tokio::test]
    async fn test_compare_reports_delta_and_label_agreement() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(remote_result()))
            .mount(&server)
            .await;

        let router = router_with_provider(server.uri(), AnalysisBackend::Local);
        let (status, body) =
            send(router, post_json("/api/v1/analyze/compare", analysis_body())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["local"]["score"], 56);
        assert_eq!(body["remote"]["score"], 85);
        assert_eq!(body["scoreDelta"], 29);
        assert_eq!(body["labelsAgree"], false);
    }

    #[tokio::test]
    async fn test_compare_without_provider_is_not_configured() {
        let (status, body) =
            send(local_router(), post_json("/api/v1/analyze/compare", analysis_body())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "NOT_CONFIGURED");
    }
}
