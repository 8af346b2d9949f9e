use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} in chat {} - {}", command, chat_id, d),
        None => info!("CMD_START: {} in chat {}", command, chat_id),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} in chat {} - {}", command, chat_id, d),
        None => info!("CMD_SUCCESS: {} in chat {}", command, chat_id),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, chat_id: i64, error: &str) {
    error!("CMD_ERROR: {} in chat {} - {}", command, chat_id, error);
}

/// Logs a discarded update from a chat other than the owner's
pub fn log_unauthorized(chat_id: i64) {
    debug!("UNAUTHORIZED: ignoring update from chat {}", chat_id);
}

/// Logs database operations with consistent format
pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, table: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("DB_ERROR: {} on {} failed: {} - {}", operation, table, error, d),
        None => error!("DB_ERROR: {} on {} failed: {}", operation, table, error),
    }
}

/// Logs failed outbound Telegram deliveries
pub fn log_notification_error(operation: &str, chat_id: i64, error: &str) {
    warn!("NOTIFY_ERROR: {} to chat {} failed: {}", operation, chat_id, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
