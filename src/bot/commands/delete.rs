use crate::bot::handlers::DATABASE_ERROR_REPLY;
use crate::database::{connection::DatabaseManager, models::Wish};
use crate::services::notifier::Notifier;
use crate::utils::logging::{log_command_error, log_command_success};

pub const DELETE_ALL_PROMPT: &str = "⚠️ This will delete <b>all</b> wishes.\n\n\
Send /delete_all_confirm to continue or /abort to cancel.\n\
Tip: /list first to keep a backup.";

pub const ABORT_REPLY: &str = "👌 Cancelled. Nothing was deleted.";

pub async fn handle_delete(notifier: &dyn Notifier, chat_id: i64, id: i64, db: &DatabaseManager) {
    match Wish::delete_by_id(&db.pool, id).await {
        Ok(0) => {
            notifier.send_text(chat_id, &format!("❌ Wish #{id} not found.")).await;
        }
        Ok(_) => {
            notifier.send_text(chat_id, &format!("✅ Wish #{id} deleted.")).await;
            log_command_success("/delete", chat_id, Some(&format!("id {id}")));
        }
        Err(e) => {
            log_command_error("/delete", chat_id, &e.to_string());
            notifier.send_text(chat_id, DATABASE_ERROR_REPLY).await;
        }
    }
}

/// Only prompts; nothing is deleted until `/delete_all_confirm`.
pub async fn handle_delete_all(notifier: &dyn Notifier, chat_id: i64) {
    notifier.send_text(chat_id, DELETE_ALL_PROMPT).await;
}

// Runs whether or not a /delete_all prompt preceded it.
pub async fn handle_delete_all_confirm(notifier: &dyn Notifier, chat_id: i64, db: &DatabaseManager) {
    match Wish::delete_all(&db.pool).await {
        Ok(count) => {
            notifier.send_text(chat_id, &format!("🗑 Deleted {count} wishes.")).await;
            log_command_success("/delete_all_confirm", chat_id, Some(&format!("{count} rows")));
        }
        Err(e) => {
            log_command_error("/delete_all_confirm", chat_id, &e.to_string());
            notifier.send_text(chat_id, DATABASE_ERROR_REPLY).await;
        }
    }
}

pub async fn handle_abort(notifier: &dyn Notifier, chat_id: i64) {
    notifier.send_text(chat_id, ABORT_REPLY).await;
}
