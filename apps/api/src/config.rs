use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Which analyzer serves `/api/v1/analyze`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisBackend {
    #[default]
    Local,
    Remote,
}

impl FromStr for AnalysisBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(AnalysisBackend::Local),
            "remote" => Ok(AnalysisBackend::Remote),
            other => bail!("ANALYSIS_BACKEND must be 'local' or 'remote', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup on invalid values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub analysis_backend: AnalysisBackend,
    pub provider_url: Option<String>,
    pub provider_timeout_secs: u64,
    pub skill_vocabulary_path: Option<PathBuf>,
    pub max_input_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            analysis_backend: AnalysisBackend::Local,
            provider_url: None,
            provider_timeout_secs: 120,
            skill_vocabulary_path: None,
            max_input_chars: 100_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            port: match get("PORT") {
                Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            analysis_backend: match get("ANALYSIS_BACKEND") {
                Some(v) => v.parse()?,
                None => defaults.analysis_backend,
            },
            provider_url: get("PROVIDER_URL"),
            provider_timeout_secs: match get("PROVIDER_TIMEOUT_SECS") {
                Some(v) => v
                    .parse::<u64>()
                    .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
                None => defaults.provider_timeout_secs,
            },
            skill_vocabulary_path: get("SKILL_VOCABULARY_PATH").map(PathBuf::from),
            max_input_chars: match get("MAX_INPUT_CHARS") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_INPUT_CHARS must be a positive integer")?,
                None => defaults.max_input_chars,
            },
        };

        if config.analysis_backend == AnalysisBackend::Remote && config.provider_url.is_none() {
            bail!("PROVIDER_URL is required when ANALYSIS_BACKEND=remote");
        }

        Ok(config)
    }
}
