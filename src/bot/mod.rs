/// Moderation command parsing and per-command handlers
pub mod commands;
/// Webhook payloads and the moderation processor
pub mod handlers;
