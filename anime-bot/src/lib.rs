//! # Anime bot application
//!
//! Wires dbot-telegram, handler-chain, anime-handlers and the trace.moe / Jikan clients. Loads
//! config from env and runs the REPL.

pub mod cli;
pub mod components;
pub mod config;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BotConfig, LookupConfig};
pub use runner::{run_bot, AnimeBot};
