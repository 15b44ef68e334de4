//! # dbot-core
//!
//! Core types and traits for the anime bot: [`Bot`], [`Handler`], message, photo and user types,
//! and tracing initialization. Transport-agnostic; used by dbot-telegram, handler-chain and anime-handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{DbotError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, PhotoAttachment, ToCoreMessage, ToCoreUser, User,
};
