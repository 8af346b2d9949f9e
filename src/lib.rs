//! # Wedding Guestbook
//!
//! Guests leave short wishes through a public JSON API; the couple reads and
//! moderates them from a Telegram chat.
//!
//! ## Features
//! - `GET /api/wishes` and `POST /api/wish` for the wedding website
//! - Telegram notification for every new wish
//! - Owner-only moderation commands over the bot webhook (`/list`, `/delete`, `/delete_all`)
//! - `wishes.json` backups and idempotent restore
//! - Persistent storage with SQLite

/// Moderation commands and webhook processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// HTTP API, health probes, notifications and backup restore
pub mod services;
/// Sanitization, HTML formatting and logging helpers
pub mod utils;
