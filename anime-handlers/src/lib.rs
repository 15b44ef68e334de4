//! # anime-handlers
//!
//! Handlers for the anime bot:
//! - [`CommandHandler`]: `/start`, `/help`, `/name` and the fallback for anything else.
//! - [`ImageLookupHandler`]: screenshot → trace.moe → Jikan → character list reply.
//!
//! Both share a [`SessionStore`] holding the per-user "awaiting image" flag set by `/name`.

mod command_handler;
mod commands;
mod image_lookup_handler;
pub mod replies;
mod session;

pub use command_handler::CommandHandler;
pub use commands::{is_command, Command, ParsedCommand};
pub use image_lookup_handler::{ImageLookupHandler, LookupOutcome};
pub use session::SessionStore;
