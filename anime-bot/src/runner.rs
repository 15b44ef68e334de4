//! Runner: assembles the bot from config and drives the REPL. [`AnimeBot`] exposes the chain for tests.

use anime_handlers::Command;
use anyhow::Result;
use dbot_core::{init_tracing, Bot, HandlerResponse, Message as CoreMessage};
use dbot_telegram::run_repl;
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, instrument, warn};

use super::components::{build_bot_components, build_handler_chain, BotComponents};
use super::config::BotConfig;

/// Config, components and handler chain, without the polling loop. Lets tests drive the chain directly.
pub struct AnimeBot {
    pub config: BotConfig,
    pub components: BotComponents,
    pub handler_chain: HandlerChain,
}

impl AnimeBot {
    /// Validates config and assembles components; handlers reply through Telegram.
    pub fn new(config: BotConfig) -> Result<Self> {
        Self::with_handler_bot(config, None)
    }

    /// Like [`AnimeBot::new`], but handlers use `handler_bot` when given (tests).
    pub fn with_handler_bot(config: BotConfig, handler_bot: Option<Arc<dyn Bot>>) -> Result<Self> {
        config.validate()?;
        let components = build_bot_components(&config, handler_bot)?;
        let handler_chain = build_handler_chain(&config, &components);
        Ok(Self {
            config,
            components,
            handler_chain,
        })
    }

    /// Drive handler chain with a core Message; errors are logged like in the REPL.
    pub async fn handle_core_message(&self, message: &CoreMessage) -> HandlerResponse {
        match self.handler_chain.handle(message).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "Handler chain failed");
                HandlerResponse::Stop
            }
        }
    }

    /// Registers /start, /help, /name in Telegram's command menu. Failure only loses the menu.
    pub async fn register_commands(&self) {
        match self
            .components
            .teloxide_bot
            .set_my_commands(Command::bot_commands())
            .await
        {
            Ok(_) => info!("Bot commands registered"),
            Err(e) => warn!(error = %e, "Failed to register bot commands"),
        }
    }
}

/// Main entry: validate config, init logging, build components, register commands, then run REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        telegram_api_url = ?config.telegram_api_url(),
        log_file = %config.log_file(),
        "Initializing bot"
    );

    let bot = AnimeBot::new(config)?;
    bot.register_commands().await;

    info!("Bot started successfully");

    run_repl(
        bot.components.teloxide_bot.clone(),
        bot.handler_chain.clone(),
        bot.components.bot_username.clone(),
    )
    .await
}
