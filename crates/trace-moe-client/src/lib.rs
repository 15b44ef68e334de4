//! # trace.moe client
//!
//! Identifies the anime a screenshot comes from. [`AnimeIdentifier`] is the seam used by handlers;
//! [`TraceMoeClient`] implements it against the trace.moe search API
//! (<https://soruly.github.io/trace.moe-api/>).
//!
//! The image is uploaded as multipart field `image` to `POST {base}/search?anilistInfo`; the
//! `anilistInfo` flag makes trace.moe embed AniList titles and the MyAnimeList id in each result.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument, warn};

mod types;

pub use types::{AnimeMatch, AnilistField, AnilistInfo, AnilistTitle, SearchResponse, SearchResult};

/// Default trace.moe API base.
pub const TRACE_MOE_API_BASE: &str = "https://api.trace.moe";

/// Turns image bytes into the best matching anime, if any.
#[async_trait]
pub trait AnimeIdentifier: Send + Sync {
    /// Returns `Ok(None)` when the service found no match; `Err` on transport or API errors.
    async fn identify(&self, image: Vec<u8>) -> Result<Option<AnimeMatch>>;
}

/// trace.moe search client.
#[derive(Debug, Clone)]
pub struct TraceMoeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    cut_borders: bool,
}

impl Default for TraceMoeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceMoeClient {
    /// Creates a client against the public trace.moe API, 30s timeout, no API key.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: TRACE_MOE_API_BASE.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            cut_borders: false,
        }
    }

    /// Uses a different API base (self-hosted trace.moe or a test server). Trailing `/` is ignored.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sends the key as `x-trace-key` for higher quota.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Asks trace.moe to cut black borders before matching.
    pub fn with_cut_borders(mut self, cut_borders: bool) -> Self {
        self.cut_borders = cut_borders;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        let mut url = format!("{}/search?anilistInfo", self.base_url);
        if self.cut_borders {
            url.push_str("&cutBorders");
        }
        url
    }

    /// Uploads the image and returns the raw search response.
    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    pub async fn search(&self, image: Vec<u8>) -> Result<SearchResponse> {
        let part = Part::bytes(image)
            .file_name("image.jpg")
            .mime_str("image/jpeg")?;
        let form = Form::new().part("image", part);

        let mut request = self
            .client
            .post(self.search_url())
            .timeout(self.timeout)
            .multipart(form);
        if let Some(ref key) = self.api_key {
            request = request.header("x-trace-key", key);
        }

        let response = request.send().await.context("trace.moe request failed")?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "trace.moe returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            );
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .context("trace.moe response is not valid search JSON")?;
        if let Some(err) = parsed.error.as_deref().filter(|e| !e.is_empty()) {
            anyhow::bail!("trace.moe error: {}", err);
        }
        Ok(parsed)
    }
}

#[async_trait]
impl AnimeIdentifier for TraceMoeClient {
    async fn identify(&self, image: Vec<u8>) -> Result<Option<AnimeMatch>> {
        let response = self.search(image).await?;
        let Some(first) = response.result.first() else {
            info!("trace.moe returned no results");
            return Ok(None);
        };

        let matched = AnimeMatch::from_result(first);
        match &matched {
            Some(m) => info!(
                title = %m.title,
                mal_id = ?m.mal_id,
                anilist_id = m.anilist_id,
                similarity = m.similarity,
                "trace.moe match"
            ),
            None => warn!("trace.moe top result has no AniList title (anilistInfo missing?)"),
        }
        Ok(matched)
    }
}
