//! BotConfig: TelegramConfig + LookupConfig. Use load() for env-based loading.

use anyhow::Result;
use dbot_telegram::TelegramConfig;

use super::LookupConfig;

/// Full bot config. Use BotConfig::load() for env-based loading, then validate().
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub lookup: LookupConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        let lookup = LookupConfig::from_env()?;
        Ok(Self { telegram, lookup })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        self.lookup.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.telegram.bot_token
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.telegram.telegram_api_url.as_deref()
    }
    pub fn log_file(&self) -> &str {
        &self.telegram.log_file
    }
    pub fn lookup(&self) -> &LookupConfig {
        &self.lookup
    }
}
