use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::{AnalysisBackend, Config};
use crate::provider::ProviderClient;
use crate::screening::analyzer::{Analyzer, LocalAnalyzer, RemoteAnalyzer};
use crate::screening::engine::MatchEngine;
use crate::screening::vocabulary::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Local engine. Always present; `/compare` runs it next to the provider.
    pub engine: Arc<MatchEngine>,
    /// Present when `PROVIDER_URL` is configured.
    pub provider: Option<ProviderClient>,
    /// Backend behind `/api/v1/analyze`, chosen via `ANALYSIS_BACKEND`.
    pub analyzer: Arc<dyn Analyzer>,
}

impl AppState {
    pub fn build(config: Config, vocabulary: SkillVocabulary) -> Result<Self> {
        let engine = Arc::new(MatchEngine::new(vocabulary));

        let provider = config
            .provider_url
            .clone()
            .map(|url| ProviderClient::new(url, Duration::from_secs(config.provider_timeout_secs)))
            .transpose()
            .context("Failed to build provider HTTP client")?;

        let analyzer: Arc<dyn Analyzer> = match (config.analysis_backend, &provider) {
            (AnalysisBackend::Local, _) => Arc::new(LocalAnalyzer::new(engine.clone())),
            (AnalysisBackend::Remote, Some(client)) => Arc::new(RemoteAnalyzer::new(client.clone())),
            (AnalysisBackend::Remote, None) => {
                anyhow::bail!("PROVIDER_URL is required when ANALYSIS_BACKEND=remote")
            }
        };

        Ok(Self {
            config,
            engine,
            provider,
            analyzer,
        })
    }
}
