//! Backup export and the restore pipeline.
//!
//! A backup is an indented JSON array of wishes. Restoring upserts every usable
//! record inside one transaction, so running the same backup twice yields the
//! same store contents.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::database::connection::DatabaseManager;
use crate::database::models::{normalize_timestamp, timestamp_now, Wish};
use crate::utils::logging::{log_database_error, log_database_operation};
use crate::utils::sanitize::{normalize_stored, stored_char_count, Field};

/// One entry of a backup file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    /// Blank means "restore time".
    #[serde(default)]
    pub created_at: String,
}

impl From<&Wish> for BackupRecord {
    fn from(wish: &Wish) -> Self {
        Self {
            id: wish.id,
            name: wish.name.clone(),
            message: wish.message.clone(),
            created_at: wish.created_at.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("backup file is empty")]
    Empty,
    #[error("invalid backup file: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub restored: usize,
    pub skipped: usize,
}

/// Serializes wishes into the backup format.
pub fn export_backup(wishes: &[Wish]) -> Result<Vec<u8>, serde_json::Error> {
    let records: Vec<BackupRecord> = wishes.iter().map(BackupRecord::from).collect();
    serde_json::to_vec_pretty(&records)
}

pub fn parse_backup(bytes: &[u8]) -> Result<Vec<BackupRecord>, RestoreError> {
    let records: Vec<BackupRecord> = serde_json::from_slice(bytes)?;
    if records.is_empty() {
        return Err(RestoreError::Empty);
    }
    Ok(records)
}

/// A record ready to be written.
struct PreparedRecord {
    id: i64,
    name: String,
    message: String,
    created_at: String,
}

fn prepare(record: &BackupRecord) -> Option<PreparedRecord> {
    if record.id <= 0 {
        tracing::warn!("Skipping backup record with invalid id {}", record.id);
        return None;
    }

    let name = normalize_stored(&record.name)?;
    let message = normalize_stored(&record.message)?;

    for (field, text) in [(Field::Name, &name), (Field::Message, &message)] {
        let length = stored_char_count(text);
        if length > field.max_chars() {
            tracing::warn!(
                "Skipping backup record {}: {} has {} characters, limit is {}",
                record.id, field, length, field.max_chars()
            );
            return None;
        }
    }

    let created_at = if record.created_at.trim().is_empty() {
        timestamp_now()
    } else {
        match normalize_timestamp(&record.created_at) {
            Ok(ts) => ts,
            Err(e) => {
                tracing::warn!(
                    "Skipping backup record {}: bad created_at '{}': {}",
                    record.id, record.created_at, e
                );
                return None;
            }
        }
    };

    Some(PreparedRecord {
        id: record.id,
        name,
        message,
        created_at,
    })
}

/// Upserts `records` in a single transaction.
///
/// Records with a blank or overlong name or message, or an unusable id or
/// timestamp, are skipped. `restored` counts distinct ids written, so an id
/// repeated within one backup counts once and its last copy wins. A failing row is logged and skipped without aborting the others.
/// If the transaction cannot be opened or committed the store is left as it
/// was and the error is returned.
pub async fn restore_wishes(
    db: &DatabaseManager,
    records: &[BackupRecord],
) -> Result<RestoreSummary, sqlx::Error> {
    let mut summary = RestoreSummary::default();
    let mut restored_ids = HashSet::new();
    let mut tx = db.pool.begin().await?;

    for record in records {
        let Some(prepared) = prepare(record) else {
            summary.skipped += 1;
            continue;
        };

        match Wish::upsert(
            &mut *tx,
            prepared.id,
            &prepared.name,
            &prepared.message,
            &prepared.created_at,
        )
        .await
        {
            Ok(()) => {
                restored_ids.insert(prepared.id);
            }
            Err(e) => {
                let details = format!("id {}", prepared.id);
                log_database_error("UPSERT", "wishes", &e.to_string(), Some(&details));
                summary.skipped += 1;
            }
        }
    }

    tx.commit().await?;
    summary.restored = restored_ids.len();

    let details = format!("restored {}, skipped {}", summary.restored, summary.skipped);
    log_database_operation("RESTORE", "wishes", Some(&details));

    Ok(summary)
}
