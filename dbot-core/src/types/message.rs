//! Message and photo attachment types for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// One photo attached to a message. Transports offering several sizes pick the largest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAttachment {
    /// Transport-specific id used with [`crate::Bot::download_file`].
    pub file_id: String,
    pub width: u32,
    pub height: u32,
    pub file_size: Option<u32>,
}

/// A single incoming message: user, chat, text content and optional photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Text, or the caption for photo messages; empty when neither is present.
    pub content: String,
    /// `"photo"` when [`Message::photo`] is set, otherwise `"text"`.
    pub message_type: String,
    pub photo: Option<PhotoAttachment>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when the message carries a photo.
    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}
