//! Shared test doubles: a recording [`Bot`], stub identifier/catalog, and message builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anime_handlers::{CommandHandler, ImageLookupHandler, SessionStore};
use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, DbotError, Message, PhotoAttachment, Result, User};
use handler_chain::HandlerChain;
use jikan_client::{CharacterCatalog, CharacterRecord};
use trace_moe_client::{AnimeIdentifier, AnimeMatch};

pub const USER_ID: i64 = 123;
pub const CHAT_ID: i64 = 456;

/// Bot that records every reply and serves fixed bytes for downloads.
#[derive(Default)]
pub struct RecordingBot {
    pub replies: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<String>>,
    pub fail_download: bool,
}

impl RecordingBot {
    pub fn failing_download() -> Self {
        Self {
            fail_download: true,
            ..Default::default()
        }
    }

    pub fn replies(&self) -> Vec<String> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn reply_to(&self, _message: &Message, text: &str) -> Result<()> {
        self.replies.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(file_id.to_string());
        if self.fail_download {
            return Err(DbotError::Download("file is too big".to_string()));
        }
        Ok(b"fake-jpeg".to_vec())
    }
}

/// Identifier returning a canned answer and counting calls.
pub struct StubIdentifier {
    pub answer: std::result::Result<Option<AnimeMatch>, String>,
    pub calls: AtomicUsize,
}

impl StubIdentifier {
    pub fn matching(title: &str, mal_id: Option<u64>, similarity: f64) -> Self {
        Self {
            answer: Ok(Some(AnimeMatch {
                title: title.to_string(),
                mal_id,
                anilist_id: 1,
                episode: Some("1".to_string()),
                similarity,
                is_adult: false,
            })),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn no_match() -> Self {
        Self {
            answer: Ok(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: Err("connection reset".to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnimeIdentifier for StubIdentifier {
    async fn identify(&self, _image: Vec<u8>) -> anyhow::Result<Option<AnimeMatch>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

/// Catalog returning a canned roster and recording requested ids.
pub struct StubCatalog {
    pub answer: std::result::Result<Vec<CharacterRecord>, String>,
    pub requested: Mutex<Vec<u64>>,
}

impl StubCatalog {
    pub fn with(characters: &[(&str, &str)]) -> Self {
        Self {
            answer: Ok(characters
                .iter()
                .map(|(name, role)| CharacterRecord {
                    name: name.to_string(),
                    role: role.to_string(),
                })
                .collect()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: Err("429 Too Many Requests".to_string()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl CharacterCatalog for StubCatalog {
    async fn characters(&self, mal_id: u64) -> anyhow::Result<Vec<CharacterRecord>> {
        self.requested.lock().unwrap().push(mal_id);
        self.answer.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

fn message(content: &str, photo: Option<PhotoAttachment>, chat_type: &str) -> Message {
    let message_type = if photo.is_some() { "photo" } else { "text" };
    Message {
        id: "10".to_string(),
        user: User {
            id: USER_ID,
            username: Some("otaku".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: CHAT_ID,
            chat_type: chat_type.to_string(),
        },
        content: content.to_string(),
        message_type: message_type.to_string(),
        photo,
        created_at: Utc::now(),
    }
}

pub fn text_message(content: &str) -> Message {
    message(content, None, "private")
}

pub fn group_text_message(content: &str) -> Message {
    message(content, None, "group")
}

pub fn photo_message() -> Message {
    message(
        "",
        Some(PhotoAttachment {
            file_id: "largest-size".to_string(),
            width: 1280,
            height: 720,
            file_size: Some(98_304),
        }),
        "private",
    )
}

/// Everything a chain test needs to inspect afterwards.
pub struct Harness {
    pub chain: HandlerChain,
    pub bot: Arc<RecordingBot>,
    pub sessions: Arc<SessionStore>,
    pub identifier: Arc<StubIdentifier>,
    pub catalog: Arc<StubCatalog>,
}

/// Builds the production handler order: commands first, then image lookup.
pub fn harness(bot: RecordingBot, identifier: StubIdentifier, catalog: StubCatalog) -> Harness {
    let bot = Arc::new(bot);
    let sessions = Arc::new(SessionStore::new());
    let identifier = Arc::new(identifier);
    let catalog = Arc::new(catalog);
    let bot_username = Arc::new(tokio::sync::RwLock::new(Some("animebot".to_string())));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            bot_username,
            sessions.clone(),
            bot.clone(),
        )))
        .add_handler(Arc::new(ImageLookupHandler::new(
            sessions.clone(),
            identifier.clone(),
            catalog.clone(),
            bot.clone(),
        )));

    Harness {
        chain,
        bot,
        sessions,
        identifier,
        catalog,
    }
}
