//! Command handler: `/start`, `/help`, `/name`, and the fallback reply for anything else that is not a photo.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::commands::{Command, ParsedCommand};
use crate::replies::{MSG_HELP, MSG_NAME_PROMPT, MSG_UNKNOWN, MSG_WELCOME};
use crate::session::SessionStore;

/// Answers text commands. Photos are left to [`crate::ImageLookupHandler`].
///
/// In private chats any unrecognized text gets the fallback reply; in groups only commands addressed
/// to this bot are answered so ordinary conversation is not interrupted.
#[derive(Clone)]
pub struct CommandHandler {
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
    sessions: Arc<SessionStore>,
    bot: Arc<dyn CoreBot>,
}

impl CommandHandler {
    pub fn new(
        bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
        sessions: Arc<SessionStore>,
        bot: Arc<dyn CoreBot>,
    ) -> Self {
        Self {
            bot_username,
            sessions,
            bot,
        }
    }

    /// Sends `text` as a reply. Send failures are logged; the message still counts as handled.
    async fn reply(&self, message: &Message, text: &str) -> HandlerResponse {
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(error = %e, user_id = message.user.id, chat_id = message.chat.id, "Failed to send reply");
        }
        HandlerResponse::Reply(text.to_string())
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.has_photo() {
            return Ok(HandlerResponse::Continue);
        }
        if message.content.trim().is_empty() {
            debug!("Message has neither text nor photo, ignoring");
            return Ok(HandlerResponse::Ignore);
        }

        let username = self.bot_username.read().await.clone().unwrap_or_default();
        let is_private = message.chat.chat_type == "private";

        let response = match Command::parse_text(&message.content, &username) {
            ParsedCommand::Known(Command::Start) => self.reply(message, MSG_WELCOME).await,
            ParsedCommand::Known(Command::Help) => self.reply(message, MSG_HELP).await,
            ParsedCommand::Known(Command::Name) => {
                self.sessions.mark_awaiting(message.user.id).await;
                info!(user_id = message.user.id, "User is now awaiting an image");
                self.reply(message, MSG_NAME_PROMPT).await
            }
            ParsedCommand::Unknown => self.reply(message, MSG_UNKNOWN).await,
            ParsedCommand::NotACommand if is_private => self.reply(message, MSG_UNKNOWN).await,
            ParsedCommand::NotACommand | ParsedCommand::OtherBot => HandlerResponse::Ignore,
        };
        Ok(response)
    }
}
