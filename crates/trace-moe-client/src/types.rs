//! trace.moe response shapes and the [`AnimeMatch`] handed to callers.

use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub frame_count: u64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result: Vec<SearchResult>,
}

/// One candidate scene, best match first.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub anilist: AnilistField,
    #[serde(default)]
    pub filename: String,
    /// Number, string, list or null depending on how the source file was named.
    #[serde(default)]
    pub episode: Value,
    #[serde(default)]
    pub similarity: f64,
}

/// Full AniList info with `anilistInfo`, otherwise only the numeric id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnilistField {
    Info(AnilistInfo),
    Id(u64),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnilistInfo {
    pub id: u64,
    #[serde(default)]
    pub id_mal: Option<u64>,
    #[serde(default)]
    pub title: AnilistTitle,
    #[serde(default)]
    pub is_adult: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnilistTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
}

impl AnilistTitle {
    /// Romaji, then English, then native; blank titles are skipped.
    pub fn preferred(&self) -> Option<&str> {
        [&self.romaji, &self.english, &self.native]
            .into_iter()
            .filter_map(|t| t.as_deref())
            .map(str::trim)
            .find(|t| !t.is_empty())
    }
}

/// Identified anime.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimeMatch {
    pub title: String,
    /// MyAnimeList id; absent for titles AniList has not linked.
    pub mal_id: Option<u64>,
    pub anilist_id: u64,
    pub episode: Option<String>,
    /// 0.0..=1.0; trace.moe considers anything below ~0.9 a likely mismatch.
    pub similarity: f64,
    pub is_adult: bool,
}

impl AnimeMatch {
    /// Builds a match from a search result; `None` when the result carries no usable title.
    pub fn from_result(result: &SearchResult) -> Option<Self> {
        let AnilistField::Info(info) = &result.anilist else {
            return None;
        };
        let title = info.title.preferred()?.to_string();
        Some(Self {
            title,
            mal_id: info.id_mal,
            anilist_id: info.id,
            episode: episode_label(&result.episode),
            similarity: result.similarity,
            is_adult: info.is_adult,
        })
    }
}

fn episode_label(episode: &Value) -> Option<String> {
    match episode {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(episode_label).collect();
            (!parts.is_empty()).then(|| parts.join("-"))
        }
        _ => None,
    }
}
