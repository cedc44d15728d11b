//! Configuration loaded from environment variables at startup.
//!
//! A `.env` file is picked up for local development.

use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub telegram_bot_token: String,
    pub telegram_channel_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let telegram_bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| ConfigError::MissingVar("TELEGRAM_BOT_TOKEN".to_string()))?;

        let telegram_channel_id = std::env::var("TELEGRAM_CHANNEL_ID")
            .map_err(|_| ConfigError::MissingVar("TELEGRAM_CHANNEL_ID".to_string()))?;

        Ok(Self {
            bind_address,
            database_url,
            telegram_bot_token,
            telegram_channel_id,
        })
    }
}
