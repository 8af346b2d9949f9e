use crate::bot::handlers::DATABASE_ERROR_REPLY;
use crate::database::connection::DatabaseManager;
use crate::services::notifier::{FileDownloader, Notifier};
use crate::services::restore::{parse_backup, restore_wishes, RestoreError};
use crate::utils::html::escape_html;
use crate::utils::logging::{log_command_error, log_command_success};

pub const RESTORE_PROMPT: &str = "📥 Send the <code>wishes.json</code> backup file produced by /list.";
pub const EMPTY_BACKUP_REPLY: &str = "❌ The backup file is empty.";
pub const DOWNLOAD_FAILED_REPLY: &str = "❌ Could not download the file.";

pub async fn handle_restore(notifier: &dyn Notifier, chat_id: i64) {
    notifier.send_text(chat_id, RESTORE_PROMPT).await;
}

/// Downloads a `wishes.json` attachment and restores it.
pub async fn handle_restore_upload(
    notifier: &dyn Notifier,
    downloader: &dyn FileDownloader,
    chat_id: i64,
    file_id: &str,
    db: &DatabaseManager,
) {
    let bytes = match downloader.download(file_id).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log_command_error("restore_upload", chat_id, &format!("download failed: {e}"));
            notifier.send_text(chat_id, DOWNLOAD_FAILED_REPLY).await;
            return;
        }
    };

    let records = match parse_backup(&bytes) {
        Ok(records) => records,
        Err(RestoreError::Empty) => {
            notifier.send_text(chat_id, EMPTY_BACKUP_REPLY).await;
            return;
        }
        Err(e) => {
            tracing::warn!("Rejected backup upload: {}", e);
            let reply = format!("❌ {}", escape_html(&e.to_string()));
            notifier.send_text(chat_id, &reply).await;
            return;
        }
    };

    match restore_wishes(db, &records).await {
        Ok(summary) => {
            let mut reply = format!("✅ Restored {} wishes.", summary.restored);
            if summary.skipped > 0 {
                reply.push_str(&format!("\nSkipped: {}.", summary.skipped));
            }
            notifier.send_text(chat_id, &reply).await;

            let details = format!("restored {}, skipped {}", summary.restored, summary.skipped);
            log_command_success("restore_upload", chat_id, Some(&details));
        }
        Err(e) => {
            log_command_error("restore_upload", chat_id, &e.to_string());
            notifier.send_text(chat_id, DATABASE_ERROR_REPLY).await;
        }
    }
}
