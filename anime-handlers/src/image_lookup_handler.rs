//! Screenshot lookup handler: on a photo from a user who issued `/name`, identifies the anime via
//! [`AnimeIdentifier`] and lists its characters via [`CharacterCatalog`].

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use jikan_client::{CharacterCatalog, CharacterRecord};
use std::sync::Arc;
use trace_moe_client::AnimeIdentifier;
use tracing::{error, info, instrument, warn};

use crate::replies::{
    format_character_reply, format_no_characters, split_for_telegram, MSG_NOT_IDENTIFIED,
    MSG_USE_NAME_FIRST, TELEGRAM_MESSAGE_LIMIT,
};
use crate::session::SessionStore;

/// Result of the two-step lookup for one image.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found {
        title: String,
        characters: Vec<CharacterRecord>,
    },
    /// Identified, but the catalog lookup failed or listed nobody.
    NoCharacters { title: String },
    NotIdentified,
}

impl LookupOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            LookupOutcome::Found { .. } => "found",
            LookupOutcome::NoCharacters { .. } => "no_characters",
            LookupOutcome::NotIdentified => "not_identified",
        }
    }

    /// Reply text for the user.
    pub fn reply_text(&self) -> String {
        match self {
            LookupOutcome::Found { title, characters } => format_character_reply(title, characters),
            LookupOutcome::NoCharacters { title } => format_no_characters(title),
            LookupOutcome::NotIdentified => MSG_NOT_IDENTIFIED.to_string(),
        }
    }
}

/// Handles photo messages. Every failure on the way (download, search, catalog) is logged and
/// turned into a user-facing reply; nothing is retried.
#[derive(Clone)]
pub struct ImageLookupHandler {
    sessions: Arc<SessionStore>,
    identifier: Arc<dyn AnimeIdentifier>,
    catalog: Arc<dyn CharacterCatalog>,
    bot: Arc<dyn CoreBot>,
    min_similarity: f64,
}

impl ImageLookupHandler {
    pub fn new(
        sessions: Arc<SessionStore>,
        identifier: Arc<dyn AnimeIdentifier>,
        catalog: Arc<dyn CharacterCatalog>,
        bot: Arc<dyn CoreBot>,
    ) -> Self {
        Self {
            sessions,
            identifier,
            catalog,
            bot,
            min_similarity: 0.0,
        }
    }

    /// Matches scoring below this similarity (0.0..=1.0) are treated as not identified.
    pub fn with_min_similarity(mut self, min_similarity: f64) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Identifies the image, then fetches the roster of the identified anime.
    #[instrument(skip(self, image), fields(image_bytes = image.len()))]
    pub async fn lookup(&self, image: Vec<u8>) -> LookupOutcome {
        let matched = match self.identifier.identify(image).await {
            Ok(Some(m)) => m,
            Ok(None) => {
                info!("No match for image");
                return LookupOutcome::NotIdentified;
            }
            Err(e) => {
                error!(error = %e, "Error searching anime by image");
                return LookupOutcome::NotIdentified;
            }
        };

        if matched.similarity < self.min_similarity {
            info!(
                title = %matched.title,
                similarity = matched.similarity,
                min_similarity = self.min_similarity,
                "Match below similarity threshold"
            );
            return LookupOutcome::NotIdentified;
        }

        let Some(mal_id) = matched.mal_id else {
            warn!(title = %matched.title, anilist_id = matched.anilist_id, "Match has no MyAnimeList id");
            return LookupOutcome::NotIdentified;
        };

        match self.catalog.characters(mal_id).await {
            Ok(characters) if !characters.is_empty() => LookupOutcome::Found {
                title: matched.title,
                characters,
            },
            Ok(_) => {
                info!(mal_id, "Catalog lists no characters");
                LookupOutcome::NoCharacters {
                    title: matched.title,
                }
            }
            Err(e) => {
                error!(error = %e, mal_id, "Error fetching character info");
                LookupOutcome::NoCharacters {
                    title: matched.title,
                }
            }
        }
    }

    /// Sends `text`, split into several messages when it exceeds Telegram's limit.
    async fn send_reply(&self, message: &Message, text: &str) -> HandlerResponse {
        for chunk in split_for_telegram(text, TELEGRAM_MESSAGE_LIMIT) {
            if let Err(e) = self.bot.reply_to(message, &chunk).await {
                error!(error = %e, user_id = message.user.id, chat_id = message.chat.id, "Failed to send reply");
                break;
            }
        }
        HandlerResponse::Reply(text.to_string())
    }
}

#[async_trait]
impl Handler for ImageLookupHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(photo) = message.photo.as_ref() else {
            return Ok(HandlerResponse::Continue);
        };

        if !self.sessions.take_awaiting(message.user.id).await {
            info!("Photo received without /name");
            return Ok(self.send_reply(message, MSG_USE_NAME_FIRST).await);
        }

        let image = match self.bot.download_file(&photo.file_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, file_id = %photo.file_id, "Failed to download photo");
                return Ok(self.send_reply(message, MSG_NOT_IDENTIFIED).await);
            }
        };

        let outcome = self.lookup(image).await;
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            outcome = outcome.kind(),
            "Lookup finished"
        );
        Ok(self.send_reply(message, &outcome.reply_text()).await)
    }
}
