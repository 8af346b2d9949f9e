pub mod message;
pub mod webhook;

use std::sync::Arc;

use crate::bot::commands::ModerationCommand;
use crate::database::connection::DatabaseManager;
use crate::services::notifier::{FileDownloader, Notifier};
use crate::utils::logging::log_unauthorized;
use webhook::WebhookUpdate;

pub const DATABASE_ERROR_REPLY: &str = "❌ Database error.";

/// Moderation command processor for the owner's chat.
///
/// Stateless between updates: every update is authorized, parsed and executed
/// on its own, and all work for one update runs sequentially.
#[derive(Clone)]
pub struct BotHandler {
    pub db: DatabaseManager,
    pub notifier: Arc<dyn Notifier>,
    pub downloader: Arc<dyn FileDownloader>,
    pub owner_chat_id: i64,
}

impl BotHandler {
    pub fn new(
        db: DatabaseManager,
        notifier: Arc<dyn Notifier>,
        downloader: Arc<dyn FileDownloader>,
        owner_chat_id: i64,
    ) -> Self {
        Self {
            db,
            notifier,
            downloader,
            owner_chat_id,
        }
    }

    /// Handles one webhook update.
    ///
    /// Updates without a message, or from any chat but the owner's, are
    /// dropped without a reply.
    pub async fn handle_update(&self, update: WebhookUpdate) {
        let Some(message) = update.message else {
            return;
        };

        let chat_id = message.chat.id;
        if chat_id != self.owner_chat_id {
            log_unauthorized(chat_id);
            return;
        }

        let command = ModerationCommand::from_message(&message);
        message::command_handler(self, chat_id, command).await;
    }
}
