//! # Jikan client
//!
//! Looks up the character roster of an anime by MyAnimeList id through the Jikan v4 API
//! (<https://docs.api.jikan.moe/>). [`CharacterCatalog`] is the seam used by handlers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};

/// Default Jikan API base (v4).
pub const JIKAN_API_BASE: &str = "https://api.jikan.moe/v4";

/// A character and the role they play in the anime ("Main", "Supporting").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    pub name: String,
    pub role: String,
}

/// Source of character rosters keyed by MyAnimeList id.
#[async_trait]
pub trait CharacterCatalog: Send + Sync {
    /// Returns the characters in catalog order; empty when the catalog lists none.
    async fn characters(&self, mal_id: u64) -> Result<Vec<CharacterRecord>>;
}

#[derive(Debug, Deserialize)]
struct CharactersResponse {
    #[serde(default)]
    data: Option<Vec<CharacterEntry>>,
}

#[derive(Debug, Deserialize)]
struct CharacterEntry {
    character: CharacterInfo,
    #[serde(default)]
    role: String,
}

#[derive(Debug, Deserialize)]
struct CharacterInfo {
    name: String,
}

/// Jikan HTTP client.
#[derive(Debug, Clone)]
pub struct JikanClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for JikanClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JikanClient {
    /// Creates a client against the public Jikan v4 API with a 30s timeout.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: JIKAN_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Uses a different API base (self-hosted Jikan or a test server). Trailing `/` is ignored.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CharacterCatalog for JikanClient {
    #[instrument(skip(self))]
    async fn characters(&self, mal_id: u64) -> Result<Vec<CharacterRecord>> {
        let url = format!("{}/anime/{}/characters", self.base_url, mal_id);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .context("Jikan request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Jikan returned {} for anime {}", status, mal_id);
        }

        let body: CharactersResponse = response
            .json()
            .await
            .context("Jikan response is not valid characters JSON")?;

        let characters: Vec<CharacterRecord> = body
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|entry| CharacterRecord {
                name: entry.character.name,
                role: entry.role,
            })
            .collect();

        info!(mal_id, count = characters.len(), "Jikan characters fetched");
        Ok(characters)
    }
}
