//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anime_handlers::{CommandHandler, ImageLookupHandler, SessionStore};
use anyhow::Result;
use dbot_core::Bot as CoreBot;
use dbot_telegram::TelegramBotAdapter;
use handler_chain::HandlerChain;
use jikan_client::{CharacterCatalog, JikanClient};
use std::sync::Arc;
use trace_moe_client::{AnimeIdentifier, TraceMoeClient};
use tracing::{info, instrument};

use super::config::BotConfig;

/// Everything the handlers and the REPL need; produced by [`build_bot_components`].
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Bot used by handlers to reply and download photos.
    pub handler_bot: Arc<dyn CoreBot>,
    /// Filled by the runner from get_me(); used to parse `/cmd@bot`.
    pub bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
    pub sessions: Arc<SessionStore>,
    pub identifier: Arc<dyn AnimeIdentifier>,
    pub catalog: Arc<dyn CharacterCatalog>,
}

/// Builds components from config. No network calls are made here.
///
/// When `handler_bot_override` is `Some`, handlers use it instead of the Telegram adapter (tests).
#[instrument(skip(config, handler_bot_override))]
pub fn build_bot_components(
    config: &BotConfig,
    handler_bot_override: Option<Arc<dyn CoreBot>>,
) -> Result<BotComponents> {
    let teloxide_bot = config.telegram.build_bot()?;
    let handler_bot: Arc<dyn CoreBot> = handler_bot_override
        .unwrap_or_else(|| Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())));

    let lookup = config.lookup();
    info!(
        trace_moe_api_url = %lookup.trace_moe_api_url,
        trace_moe_api_key_set = lookup.trace_moe_api_key.is_some(),
        jikan_api_url = %lookup.jikan_api_url,
        http_timeout_secs = lookup.http_timeout_secs,
        "Building lookup clients"
    );

    let identifier: Arc<dyn AnimeIdentifier> = Arc::new(
        TraceMoeClient::new()
            .with_base_url(lookup.trace_moe_api_url.clone())
            .with_api_key(lookup.trace_moe_api_key.clone())
            .with_cut_borders(lookup.trace_moe_cut_borders)
            .with_timeout(lookup.http_timeout()),
    );
    let catalog: Arc<dyn CharacterCatalog> = Arc::new(
        JikanClient::new()
            .with_base_url(lookup.jikan_api_url.clone())
            .with_timeout(lookup.http_timeout()),
    );

    Ok(BotComponents {
        teloxide_bot,
        handler_bot,
        bot_username: Arc::new(tokio::sync::RwLock::new(None)),
        sessions: Arc::new(SessionStore::new()),
        identifier,
        catalog,
    })
}

/// Handler order: commands first (they pass photos on), then the screenshot lookup.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let commands = CommandHandler::new(
        components.bot_username.clone(),
        components.sessions.clone(),
        components.handler_bot.clone(),
    );
    let lookup = ImageLookupHandler::new(
        components.sessions.clone(),
        components.identifier.clone(),
        components.catalog.clone(),
        components.handler_bot.clone(),
    )
    .with_min_similarity(config.lookup().min_similarity);

    let chain = HandlerChain::new()
        .add_handler(Arc::new(commands))
        .add_handler(Arc::new(lookup));
    info!(handlers = ?chain.handler_names(), "Handler chain built");
    chain
}
