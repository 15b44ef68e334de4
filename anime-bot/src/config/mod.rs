//! Bot configuration: TelegramConfig (token, API URL, log file) + LookupConfig (trace.moe, Jikan, HTTP).

mod bot_config;
mod lookup;


pub use bot_config::BotConfig;
pub use lookup::LookupConfig;
