//! Analyzer — pluggable backend behind the analyze endpoint.
//!
//! `LocalAnalyzer` runs the in-process `MatchEngine`. `RemoteAnalyzer` delegates to
//! the external provider and normalizes its response. `AppState` holds an
//! `Arc<dyn Analyzer>` chosen at startup from `ANALYSIS_BACKEND`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::analysis::{AnalysisRequest, AnalysisResult};
use crate::provider::ProviderClient;
use crate::screening::engine::MatchEngine;

#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Short backend name reported in responses ("local" | "remote").
    fn backend(&self) -> &'static str;

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError>;
}

pub struct LocalAnalyzer {
    engine: Arc<MatchEngine>,
}

impl LocalAnalyzer {
    pub fn new(engine: Arc<MatchEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Analyzer for LocalAnalyzer {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        Ok(self
            .engine
            .analyze(&request.job_description, &request.resume_text)
            .with_metadata(request))
    }
}

pub struct RemoteAnalyzer {
    client: ProviderClient,
}

impl RemoteAnalyzer {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Analyzer for RemoteAnalyzer {
    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AppError> {
        Ok(self.client.analyze(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use crate::screening::classifier::Label;
    use crate::screening::vocabulary::SkillVocabulary;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            job_description: "React, Node, AWS, Docker".to_string(),
            resume_text: "React, Node, Docker, Redis".to_string(),
            candidate_name: Some("Ada".to_string()),
            role_title: Some("Platform Engineer".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_local_analyzer_passes_metadata_through() {
        let engine = Arc::new(MatchEngine::new(SkillVocabulary::builtin().unwrap()));
        let analyzer = LocalAnalyzer::new(engine);

        let result = analyzer.analyze(&request()).await.unwrap();
        assert_eq!(analyzer.backend(), "local");
        assert_eq!(result.candidate_name, "Ada");
        assert_eq!(result.role_title, "Platform Engineer");
        assert_eq!(result.score, 56);
        assert_eq!(result.label, Label::WeakFit);
    }

    #[tokio::test]
    async fn test_remote_analyzer_uses_provider_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "score": 91,
                "label": "Strong Recommend",
                "summary": "Excellent.",
                "matchedSkills": ["react"],
                "missingSkills": []
            })))
            .mount(&server)
            .await;

        let client = ProviderClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let analyzer = RemoteAnalyzer::new(client);

        let result = analyzer.analyze(&request()).await.unwrap();
        assert_eq!(analyzer.backend(), "remote");
        assert_eq!(result.score, 91);
        assert_eq!(result.label, Label::StrongRecommend);
    }

    #[tokio::test]
    async fn test_remote_analyzer_propagates_provider_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = ProviderClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let err = RemoteAnalyzer::new(client)
            .analyze(&request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Provider(ProviderError::ProviderStatus { status: 500, .. })
        ));
    }
}
