use chrono::DateTime;

use crate::bot::commands::BACKUP_FILE_NAME;
use crate::bot::handlers::DATABASE_ERROR_REPLY;
use crate::database::{connection::DatabaseManager, models::Wish};
use crate::services::notifier::Notifier;
use crate::services::restore::export_backup;
use crate::utils::html::{split_into_messages, TELEGRAM_MESSAGE_LIMIT};
use crate::utils::logging::{log_command_error, log_command_success};

pub const NO_WISHES_REPLY: &str = "📋 No wishes yet.";

/// Sends every wish, newest first, followed by the `wishes.json` backup.
pub async fn handle_list(notifier: &dyn Notifier, chat_id: i64, db: &DatabaseManager) {
    let wishes = match Wish::list_all(&db.pool).await {
        Ok(wishes) => wishes,
        Err(e) => {
            log_command_error("/list", chat_id, &e.to_string());
            notifier.send_text(chat_id, DATABASE_ERROR_REPLY).await;
            return;
        }
    };

    if wishes.is_empty() {
        notifier.send_text(chat_id, NO_WISHES_REPLY).await;
    } else {
        let header = format!("📋 <b>All wishes</b> ({}):\n\n", wishes.len());
        let entries: Vec<String> = wishes.iter().map(format_entry).collect();
        for text in split_into_messages(&header, &entries, TELEGRAM_MESSAGE_LIMIT) {
            notifier.send_text(chat_id, &text).await;
        }
    }

    match export_backup(&wishes) {
        Ok(bytes) => notifier.send_document(chat_id, BACKUP_FILE_NAME, bytes).await,
        Err(e) => log_command_error("/list", chat_id, &format!("backup export failed: {e}")),
    }

    let details = format!("{} wishes", wishes.len());
    log_command_success("/list", chat_id, Some(&details));
}

/// One list entry. Name and message are stored escaped and go out as-is.
pub fn format_entry(wish: &Wish) -> String {
    format!(
        "<b>#{}</b> from <i>{}</i> ({}):\n\"{}\"\n<code>Delete: /delete {}</code>\n\n",
        wish.id,
        wish.name,
        format_created_at(&wish.created_at),
        wish.message,
        wish.id
    )
}

fn format_created_at(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
