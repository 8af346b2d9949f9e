pub mod delete;
pub mod list;
pub mod restore;

use thiserror::Error;

use crate::bot::handlers::webhook::IncomingMessage;

/// Attachment name produced by `/list` and accepted by the restore pipeline.
pub const BACKUP_FILE_NAME: &str = "wishes.json";

pub const HELP_TEXT: &str = "Hi! 🌸\n\n\
Available commands:\n\n\
/list - all wishes plus a wishes.json backup\n\
/delete 5 - delete a wish by ID\n\
/delete_all - delete every wish\n\
/restore - restore wishes from a wishes.json backup";

/// Moderation commands understood by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationCommand {
    Start,
    List,
    Delete { id: i64 },
    DeleteAll,
    DeleteAllConfirm,
    Abort,
    Restore,
    /// A `wishes.json` attachment.
    RestoreUpload { file_id: String },
    /// A known verb with unusable arguments.
    InvalidArguments(ArgumentError),
    Unrecognized(String),
    /// Nothing to act on (no text, no attachment).
    Empty,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("usage: /delete <id>")]
    DeleteUsage,
    #[error("wish id must be a number")]
    WishIdNotNumber,
}

impl ModerationCommand {
    /// Parses a text command.
    ///
    /// The trimmed text is split into a verb and its arguments; a `@botname`
    /// suffix on the verb is ignored. Verbs are matched exactly, so
    /// `/DELETE_ALL_CONFIRM` is not a command. Verbs without parameters must
    /// be sent on their own.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let mut tokens = trimmed.split_whitespace();
        let Some(first) = tokens.next() else {
            return ModerationCommand::Empty;
        };
        let args: Vec<&str> = tokens.collect();

        let verb = first.split('@').next().unwrap_or(first);

        let command = match verb {
            "/start" | "/help" => ModerationCommand::Start,
            "/list" => ModerationCommand::List,
            "/delete" => return parse_delete(&args),
            "/delete_all" => ModerationCommand::DeleteAll,
            "/delete_all_confirm" => ModerationCommand::DeleteAllConfirm,
            "/abort" => ModerationCommand::Abort,
            "/restore" => ModerationCommand::Restore,
            _ => return ModerationCommand::Unrecognized(trimmed.to_string()),
        };

        if args.is_empty() {
            command
        } else {
            ModerationCommand::Unrecognized(trimmed.to_string())
        }
    }

    /// Classifies an inbound message; a backup attachment wins over text.
    pub fn from_message(message: &IncomingMessage) -> Self {
        if let Some(document) = &message.document {
            let is_backup = document
                .file_name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(BACKUP_FILE_NAME));
            if is_backup {
                return ModerationCommand::RestoreUpload {
                    file_id: document.file_id.clone(),
                };
            }
        }

        match message.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Self::parse(text),
            _ => match &message.document {
                Some(document) => ModerationCommand::Unrecognized(
                    document.file_name.clone().unwrap_or_default(),
                ),
                None => ModerationCommand::Empty,
            },
        }
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            ModerationCommand::Start => "/start",
            ModerationCommand::List => "/list",
            ModerationCommand::Delete { .. } => "/delete",
            ModerationCommand::DeleteAll => "/delete_all",
            ModerationCommand::DeleteAllConfirm => "/delete_all_confirm",
            ModerationCommand::Abort => "/abort",
            ModerationCommand::Restore => "/restore",
            ModerationCommand::RestoreUpload { .. } => "restore_upload",
            ModerationCommand::InvalidArguments(_) => "invalid_arguments",
            ModerationCommand::Unrecognized(_) => "unrecognized",
            ModerationCommand::Empty => "empty",
        }
    }
}

fn parse_delete(args: &[&str]) -> ModerationCommand {
    let [raw_id] = args else {
        return ModerationCommand::InvalidArguments(ArgumentError::DeleteUsage);
    };

    match raw_id.parse::<i64>() {
        Ok(id) if id > 0 => ModerationCommand::Delete { id },
        Ok(_) => ModerationCommand::InvalidArguments(ArgumentError::DeleteUsage),
        Err(_) => ModerationCommand::InvalidArguments(ArgumentError::WishIdNotNumber),
    }
}
