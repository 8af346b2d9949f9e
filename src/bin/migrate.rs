use anyhow::{anyhow, Result};
use wedding_guestbook::config::Config;
use wedding_guestbook::database::connection::{sqlite_file_path, DatabaseManager};
use std::env;
use std::io;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize basic logging for the migration
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    match command {
        "migrate" | "up" => run_migrations().await,
        "check" => check_database().await,
        "reset" => reset_database().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

fn database_url() -> String {
    dotenvy::dotenv().ok();
    Config::database_url_from_env()
}

async fn run_migrations() -> Result<()> {
    println!("💍 Wedding Guestbook - Database Migration Tool");
    println!("==============================================");

    let database_url = database_url();
    println!("📊 Database URL: {}", mask_url(&database_url));

    println!("🚀 Running database migrations...");

    let db_manager = DatabaseManager::new(&database_url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match db_manager.run_migrations().await {
        Ok(_) => {
            println!("✅ Migrations completed successfully!");
        }
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn check_database() -> Result<()> {
    println!("🔍 Checking database connection and schema...");

    let database_url = database_url();
    println!("📊 Database URL: {}", mask_url(&database_url));

    let db_manager = DatabaseManager::new(&database_url).await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match check_tables(&db_manager).await {
        Ok(tables) => {
            println!("✅ Database connection successful!");
            println!("📋 Found tables:");
            for table in tables {
                println!("  • {table}");
            }
            match count_wishes(&db_manager).await {
                Ok(count) => println!("💌 Stored wishes: {count}"),
                Err(e) => println!("⚠️  Wishes table unavailable: {e}"),
            }
        }
        Err(e) => {
            println!("⚠️  Database check failed: {e}");
            println!("💡 Try running 'migrate up' to create the schema");
        }
    }

    Ok(())
}

async fn reset_database() -> Result<()> {
    println!("⚠️  WARNING: This will delete ALL wishes in the database!");
    println!("💡 Send /list to the bot first if you need a backup.");
    println!("🤔 Are you sure you want to continue? (yes/no)");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    if input.trim().to_lowercase() != "yes" {
        println!("❌ Reset cancelled.");
        return Ok(());
    }

    let database_url = database_url();

    // For SQLite, we can just delete the file
    match sqlite_file_path(&database_url) {
        Some(db_path) => {
            if db_path.exists() {
                std::fs::remove_file(db_path)?;
                println!("🗑️  Deleted database file: {}", db_path.display());
            }
        }
        None => return Err(anyhow!("Reset is only supported for file-backed SQLite databases")),
    }

    // Run migrations to recreate the schema
    println!("🔄 Recreating database schema...");
    run_migrations().await?;

    println!("✅ Database reset completed!");

    Ok(())
}

async fn check_tables(db_manager: &DatabaseManager) -> Result<Vec<String>> {
    let tables = sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name"
    )
    .fetch_all(&db_manager.pool)
    .await?;

    Ok(tables)
}

async fn count_wishes(db_manager: &DatabaseManager) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM wishes")
        .fetch_one(&db_manager.pool)
        .await?;

    Ok(count)
}

fn mask_url(url: &str) -> String {
    // Only show the file name of SQLite databases
    match sqlite_file_path(url).and_then(Path::file_name) {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("💍 Wedding Guestbook - Database Migration Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up    Run database migrations (default)");
    println!("    check          Check database connection and schema");
    println!("    reset          Reset database (SQLite only) - DESTRUCTIVE!");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: sqlite:./data/guestbook.db)");
    println!();
}
