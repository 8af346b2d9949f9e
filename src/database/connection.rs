use anyhow::Result;
use sqlx::{SqlitePool, migrate::MigrateDatabase, Sqlite};
use std::path::Path;
use tracing::info;

/// File path of a `sqlite:` URL, without the scheme or query string.
///
/// Returns `None` for in-memory databases and non-SQLite URLs.
pub fn sqlite_file_path(database_url: &str) -> Option<&Path> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let rest = rest.strip_prefix("//").unwrap_or(rest);
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(Path::new(path))
    }
}

/// Owns the connection pool of the wish store.
///
/// Built once by the entry point and handed to the moderation processor and the
/// HTTP handlers; cloning shares the underlying pool.
#[derive(Clone)]
pub struct DatabaseManager {
    pub pool: SqlitePool,
}

impl DatabaseManager {
    pub async fn new(database_url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            if let Some(parent) = sqlite_file_path(database_url).and_then(|p| p.parent()) {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    info!("Creating directory {}", parent.display());
                    std::fs::create_dir_all(parent)?;
                }
            }
            info!("Creating database {}", database_url);
            Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePool::connect(database_url).await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Round-trips a trivial query; used by the health probes.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
