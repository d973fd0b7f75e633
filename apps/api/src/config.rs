use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::embedding_client::DEFAULT_MODEL;
use crate::screening::aggregator::AggregationMode;
use crate::screening::engine::{ScoringGranularity, DEFAULT_MAX_CONCURRENCY};
use crate::screening::fit_band::FitThresholds;
use crate::screening::oracle::OracleBackend;

const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub oracle_backend: OracleBackend,
    /// Required when `oracle_backend` is semantic.
    pub embedding_url: Option<String>,
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
    pub aggregation_mode: AggregationMode,
    pub granularity: ScoringGranularity,
    pub oracle_timeout: Duration,
    pub max_scoring_concurrency: usize,
    pub fit_thresholds: FitThresholds,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let oracle_backend: OracleBackend = parse_or(&lookup, "ORACLE_BACKEND", OracleBackend::Lexical)?;
        let embedding_url = lookup("EMBEDDING_URL").filter(|s| !s.trim().is_empty());

        if oracle_backend == OracleBackend::Semantic && embedding_url.is_none() {
            return Err(anyhow!(
                "Required environment variable 'EMBEDDING_URL' is not set (ORACLE_BACKEND=semantic)"
            ));
        }

        let fit_thresholds = match lookup("FIT_THRESHOLDS") {
            Some(raw) => raw
                .parse::<FitThresholds>()
                .with_context(|| format!("FIT_THRESHOLDS '{raw}' is invalid"))?,
            None => FitThresholds::default(),
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            oracle_backend,
            embedding_url,
            embedding_model: lookup("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            embedding_api_key: lookup("EMBEDDING_API_KEY").filter(|s| !s.is_empty()),
            aggregation_mode: parse_or(&lookup, "AGGREGATION_MODE", AggregationMode::BandWeighted)?,
            granularity: parse_or(&lookup, "SCORING_GRANULARITY", ScoringGranularity::WholeDocument)?,
            oracle_timeout: Duration::from_millis(parse_or(
                &lookup,
                "ORACLE_TIMEOUT_MS",
                DEFAULT_ORACLE_TIMEOUT_MS,
            )?),
            max_scoring_concurrency: parse_or(
                &lookup,
                "MAX_SCORING_CONCURRENCY",
                DEFAULT_MAX_CONCURRENCY,
            )?
            .max(1),
            fit_thresholds,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}
