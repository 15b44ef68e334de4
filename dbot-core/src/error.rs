//! Error types for the bot core.
//!
//! [`DbotError`] covers transport failures; lookup failures never reach it because handlers turn
//! them into replies.

use thiserror::Error;

/// Top-level error for dbot (bot transport and file download).
#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Download error: {0}")]
    Download(String),
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
