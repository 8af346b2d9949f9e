#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};
use wedding_guestbook::bot::handlers::webhook::{
    IncomingChat, IncomingDocument, IncomingMessage, WebhookUpdate,
};
use wedding_guestbook::bot::handlers::BotHandler;
use wedding_guestbook::database::connection::DatabaseManager;
use wedding_guestbook::services::notifier::{FileDownloader, Notifier};

pub const OWNER_CHAT_ID: i64 = 424242;
pub const STRANGER_CHAT_ID: i64 = 777;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text { chat_id: i64, text: String },
    Document { chat_id: i64, file_name: String, bytes: Vec<u8> },
}

/// Records outbound traffic and serves uploaded files from memory.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Outbound>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl RecordingNotifier {
    pub fn add_file(&self, file_id: &str, bytes: &[u8]) {
        self.files.lock().unwrap().insert(file_id.to_string(), bytes.to_vec());
    }

    pub fn sent(&self) -> Vec<Outbound> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Text { text, .. } => Some(text),
                Outbound::Document { .. } => None,
            })
            .collect()
    }

    pub fn last_text(&self) -> String {
        self.texts().pop().unwrap_or_default()
    }

    pub fn documents(&self) -> Vec<(String, Vec<u8>)> {
        self.sent()
            .into_iter()
            .filter_map(|o| match o {
                Outbound::Document { file_name, bytes, .. } => Some((file_name, bytes)),
                Outbound::Text { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_text(&self, chat_id: i64, text: &str) {
        self.sent.lock().unwrap().push(Outbound::Text {
            chat_id,
            text: text.to_string(),
        });
    }

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) {
        self.sent.lock().unwrap().push(Outbound::Document {
            chat_id,
            file_name: file_name.to_string(),
            bytes,
        });
    }
}

#[async_trait]
impl FileDownloader for RecordingNotifier {
    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(file_id)
            .cloned()
            .ok_or_else(|| anyhow!("file {file_id} not found"))
    }
}

pub async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

/// A moderation processor wired to a temporary store and a recording notifier.
pub struct TestBot {
    pub handler: BotHandler,
    pub notifier: Arc<RecordingNotifier>,
    pub db: DatabaseManager,
    _temp_dir: TempDir,
}

impl TestBot {
    pub async fn new() -> Result<Self> {
        let (db, temp_dir) = setup_test_db().await?;
        let notifier = Arc::new(RecordingNotifier::default());
        let handler = BotHandler::new(db.clone(), notifier.clone(), notifier.clone(), OWNER_CHAT_ID);

        Ok(Self {
            handler,
            notifier,
            db,
            _temp_dir: temp_dir,
        })
    }

    pub async fn send(&self, text: &str) {
        self.handler.handle_update(text_update(OWNER_CHAT_ID, text)).await;
    }

    pub async fn upload(&self, file_name: &str, bytes: &[u8]) {
        let file_id = format!("file-{file_name}");
        self.notifier.add_file(&file_id, bytes);
        self.handler
            .handle_update(document_update(OWNER_CHAT_ID, &file_id, file_name))
            .await;
    }
}

pub fn text_update(chat_id: i64, text: &str) -> WebhookUpdate {
    WebhookUpdate {
        update_id: 1,
        message: Some(IncomingMessage {
            chat: IncomingChat { id: chat_id },
            text: Some(text.to_string()),
            document: None,
        }),
    }
}

pub fn document_update(chat_id: i64, file_id: &str, file_name: &str) -> WebhookUpdate {
    WebhookUpdate {
        update_id: 2,
        message: Some(IncomingMessage {
            chat: IncomingChat { id: chat_id },
            text: None,
            document: Some(IncomingDocument {
                file_id: file_id.to_string(),
                file_name: Some(file_name.to_string()),
            }),
        }),
    }
}
