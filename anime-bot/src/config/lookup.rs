//! Lookup config: reverse image search and character catalog endpoints. Loaded from env.

use anyhow::{Context, Result};
use jikan_client::JIKAN_API_BASE;
use std::env;
use std::time::Duration;
use trace_moe_client::TRACE_MOE_API_BASE;

/// Endpoints and limits for the two outbound lookups.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// TRACE_MOE_API_URL
    pub trace_moe_api_url: String,
    /// TRACE_MOE_API_KEY, sent as `x-trace-key`
    pub trace_moe_api_key: Option<String>,
    /// TRACE_MOE_CUT_BORDERS
    pub trace_moe_cut_borders: bool,
    /// JIKAN_API_URL
    pub jikan_api_url: String,
    /// HTTP_TIMEOUT_SECS, per outbound request
    pub http_timeout_secs: u64,
    /// ANIME_MIN_SIMILARITY; matches below it count as not identified
    pub min_similarity: f64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            trace_moe_api_url: TRACE_MOE_API_BASE.to_string(),
            trace_moe_api_key: None,
            trace_moe_cut_borders: false,
            jikan_api_url: JIKAN_API_BASE.to_string(),
            http_timeout_secs: 30,
            min_similarity: 0.0,
        }
    }
}

impl LookupConfig {
    /// Load from environment variables; unset values fall back to [`LookupConfig::default`].
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let trace_moe_api_url =
            env::var("TRACE_MOE_API_URL").unwrap_or(defaults.trace_moe_api_url);
        let trace_moe_api_key = env::var("TRACE_MOE_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let trace_moe_cut_borders = match env::var("TRACE_MOE_CUT_BORDERS") {
            Ok(s) => s.trim().parse().with_context(|| {
                format!("TRACE_MOE_CUT_BORDERS must be true or false: {}", s)
            })?,
            Err(_) => defaults.trace_moe_cut_borders,
        };
        let jikan_api_url = env::var("JIKAN_API_URL").unwrap_or(defaults.jikan_api_url);
        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS is not a number: {}", s))?,
            Err(_) => defaults.http_timeout_secs,
        };
        let min_similarity = match env::var("ANIME_MIN_SIMILARITY") {
            Ok(s) => s
                .parse()
                .with_context(|| format!("ANIME_MIN_SIMILARITY is not a number: {}", s))?,
            Err(_) => defaults.min_similarity,
        };

        Ok(Self {
            trace_moe_api_url,
            trace_moe_api_key,
            trace_moe_cut_borders,
            jikan_api_url,
            http_timeout_secs,
            min_similarity,
        })
    }

    /// Both URLs must parse, the timeout must be positive, similarity within 0.0..=1.0.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("TRACE_MOE_API_URL", &self.trace_moe_api_url),
            ("JIKAN_API_URL", &self.jikan_api_url),
        ] {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("{} is not a valid URL: {}", name, url);
            }
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than 0");
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            anyhow::bail!(
                "ANIME_MIN_SIMILARITY must be between 0 and 1, got {}",
                self.min_similarity
            );
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
