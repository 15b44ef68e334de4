//! # dbot-telegram
//!
//! Telegram bot framework layer: adapters, [`dbot_core::Bot`] implementation (messages and file
//! download), minimal config, REPL runner. Handles only Telegram connectivity and handler-chain
//! execution; no lookup logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{largest_photo, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{parse_message_id, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::run_repl;
