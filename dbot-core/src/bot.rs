//! Bot abstraction for replying and fetching attachments.
//!
//! [`Bot`] trait is transport-agnostic; the Telegram implementation lives in dbot-telegram.

use crate::error::Result;
use crate::types::Message;
use async_trait::async_trait;

/// Abstraction for replying to messages and downloading files. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Downloads a file by its transport-specific id (e.g. Telegram `file_id`) and returns the raw bytes.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}
