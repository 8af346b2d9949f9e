use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite};

/// A guest-submitted wish. `name` and `message` hold the sanitized, HTML-escaped text.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Wish {
    pub id: i64,
    pub name: String,
    pub message: String,
    pub created_at: String,
}

/// Current time in the storage format.
///
/// RFC 3339 in UTC with a fixed millisecond precision, so lexical order on the
/// column equals chronological order.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Re-encodes any RFC 3339 timestamp into the storage format.
pub fn normalize_timestamp(raw: &str) -> Result<String, chrono::ParseError> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim())?;
    Ok(format_timestamp(parsed.with_timezone(&Utc)))
}

impl Wish {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        name: String,
        message: String,
    ) -> Result<Self, sqlx::Error> {
        let created_at = timestamp_now();

        let result = sqlx::query(
            "INSERT INTO wishes (name, message, created_at) VALUES (?, ?, ?)"
        )
        .bind(&name)
        .bind(&message)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok(Wish {
            id: result.last_insert_rowid(),
            name,
            message,
            created_at,
        })
    }

    /// All wishes, newest first.
    pub async fn list_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Wish>(
            "SELECT id, name, message, created_at FROM wishes ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Wish>(
            "SELECT id, name, message, created_at FROM wishes WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Returns the number of rows removed (0 or 1).
    pub async fn delete_by_id(pool: &sqlx::SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wishes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_all(pool: &sqlx::SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wishes")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Inserts the wish with the given id, or overwrites name, message and
    /// creation time of the existing row.
    ///
    /// Generic over the executor so the restore pipeline can run it inside its
    /// transaction.
    pub async fn upsert<'e, E>(
        executor: E,
        id: i64,
        name: &str,
        message: &str,
        created_at: &str,
    ) -> Result<(), sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO wishes (id, name, message, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                message = excluded.message,
                created_at = excluded.created_at
            "#
        )
        .bind(id)
        .bind(name)
        .bind(message)
        .bind(created_at)
        .execute(executor)
        .await?;

        Ok(())
    }
}
