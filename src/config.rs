use anyhow::{anyhow, Result};
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/guestbook.db";
const DEFAULT_PORT: &str = "8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    /// The only chat allowed to issue moderation commands; also receives notifications.
    pub owner_chat_id: i64,
    pub database_url: String,
    pub http_port: u16,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let owner_str = env::var("OWNER_CHAT_ID")
            .map_err(|_| anyhow!("OWNER_CHAT_ID must be set"))?;
        let owner_chat_id = owner_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid OWNER_CHAT_ID"))?;

        let database_url = Self::database_url_from_env();

        let port_str = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid PORT"))?;

        let cors_allowed_origin = env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty());

        Ok(Config {
            telegram_bot_token: token,
            owner_chat_id,
            database_url,
            http_port,
            cors_allowed_origin,
        })
    }

    /// `DATABASE_URL`, falling back to the default when unset or blank.
    ///
    /// Used on its own by tooling that has no Telegram credentials.
    pub fn database_url_from_env() -> String {
        match env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => DEFAULT_DATABASE_URL.to_string(),
        }
    }
}
