//! Outbound Telegram traffic.
//!
//! Delivery is best-effort: failures are logged and never reported back to the
//! caller, so a broken Telegram connection can't fail a guest's submission or a
//! moderation command.

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};

use crate::utils::logging::log_notification_error;

/// Best-effort delivery of text and attachments to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends an HTML-formatted message.
    async fn send_text(&self, chat_id: i64, text: &str);

    /// Sends `bytes` as a named document.
    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>);
}

/// Fetches the content of a file previously sent to the bot.
#[async_trait]
pub trait FileDownloader: Send + Sync {
    async fn download(&self, file_id: &str) -> anyhow::Result<Vec<u8>>;
}

/// Bot API implementation of [`Notifier`] and [`FileDownloader`].
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_text(&self, chat_id: i64, text: &str) {
        if let Err(e) = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html)
            .await
        {
            log_notification_error("sendMessage", chat_id, &e.to_string());
        }
    }

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) {
        let document = InputFile::memory(bytes).file_name(file_name.to_string());

        if let Err(e) = self.bot.send_document(ChatId(chat_id), document).await {
            log_notification_error("sendDocument", chat_id, &e.to_string());
        }
    }
}

#[async_trait]
impl FileDownloader for TelegramNotifier {
    async fn download(&self, file_id: &str) -> anyhow::Result<Vec<u8>> {
        let file = self.bot.get_file(file_id).await?;

        let mut content = Vec::new();
        self.bot.download_file(&file.path, &mut content).await?;

        Ok(content)
    }
}
