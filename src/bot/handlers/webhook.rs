//! The subset of Telegram's webhook `Update` payload the moderation bot reads.
//!
//! Unknown fields are ignored, so full Bot API updates deserialize as well.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookUpdate {
    #[serde(default)]
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub chat: IncomingChat,
    pub text: Option<String>,
    pub document: Option<IncomingDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingChat {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingDocument {
    pub file_id: String,
    pub file_name: Option<String>,
}
