use crate::bot::commands::{delete, list, restore, ArgumentError, ModerationCommand, HELP_TEXT};
use crate::bot::handlers::BotHandler;
use crate::utils::logging::log_command_start;

pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command. Use /start";

pub async fn command_handler(handler: &BotHandler, chat_id: i64, cmd: ModerationCommand) {
    let notifier = handler.notifier.as_ref();
    let db = &handler.db;

    if cmd != ModerationCommand::Empty {
        log_command_start(cmd.name(), chat_id, None);
    }

    match cmd {
        ModerationCommand::Start => {
            notifier.send_text(chat_id, HELP_TEXT).await;
        }
        ModerationCommand::List => {
            list::handle_list(notifier, chat_id, db).await;
        }
        ModerationCommand::Delete { id } => {
            delete::handle_delete(notifier, chat_id, id, db).await;
        }
        ModerationCommand::DeleteAll => {
            delete::handle_delete_all(notifier, chat_id).await;
        }
        ModerationCommand::DeleteAllConfirm => {
            delete::handle_delete_all_confirm(notifier, chat_id, db).await;
        }
        ModerationCommand::Abort => {
            delete::handle_abort(notifier, chat_id).await;
        }
        ModerationCommand::Restore => {
            restore::handle_restore(notifier, chat_id).await;
        }
        ModerationCommand::RestoreUpload { file_id } => {
            restore::handle_restore_upload(
                notifier,
                handler.downloader.as_ref(),
                chat_id,
                &file_id,
                db,
            )
            .await;
        }
        ModerationCommand::InvalidArguments(err) => {
            notifier.send_text(chat_id, usage_reply(&err)).await;
        }
        ModerationCommand::Unrecognized(_) => {
            notifier.send_text(chat_id, UNKNOWN_COMMAND_REPLY).await;
        }
        ModerationCommand::Empty => {}
    }
}

pub fn usage_reply(err: &ArgumentError) -> &'static str {
    match err {
        ArgumentError::DeleteUsage => "Usage: <code>/delete 5</code>",
        ArgumentError::WishIdNotNumber => "❌ ID must be a number.",
    }
}
