//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, DbotError, Message, Result};
use teloxide::net::Download;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, MessageId, ReplyParameters};
use tracing::{debug, warn};

/// Parses a core message id string into a Telegram message id.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| DbotError::Bot(format!("Invalid message_id: {}", s)))
}

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let request = self.bot.send_message(ChatId(message.chat.id), text.to_string());
        let request = match parse_message_id(&message.id) {
            Ok(id) => request.reply_parameters(ReplyParameters::new(MessageId(id))),
            Err(e) => {
                warn!(error = %e, "Replying without quoting the original message");
                request
            }
        };
        request.await.map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(|e| DbotError::Download(format!("getFile failed: {}", e)))?;

        let mut bytes = Vec::with_capacity(file.size as usize);
        self.bot
            .download_file(&file.path, &mut bytes)
            .await
            .map_err(|e| DbotError::Download(format!("download of {} failed: {}", file.path, e)))?;

        debug!(file_path = %file.path, bytes = bytes.len(), "Downloaded Telegram file");
        Ok(bytes)
    }
}
