//! # Wedding Guestbook Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database and serves
//! the public API, the Telegram webhook and the health probes on one port.

use anyhow::Result;
use std::sync::Arc;
use teloxide::Bot;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wedding_guestbook::bot::handlers::BotHandler;
use wedding_guestbook::config::Config;
use wedding_guestbook::database::connection::DatabaseManager;
use wedding_guestbook::services::api::{self, ApiState};
use wedding_guestbook::services::health::HealthService;
use wedding_guestbook::services::notifier::TelegramNotifier;
use wedding_guestbook::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wedding_guestbook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Wedding Guestbook v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - HTTP Port: {}, owner chat: {}",
        config.http_port, config.owner_chat_id);

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    info!("Database initialized successfully");

    let bot = Bot::new(&config.telegram_bot_token);
    let telegram = Arc::new(TelegramNotifier::new(bot));

    let moderation = Arc::new(BotHandler::new(
        db_manager.clone(),
        telegram.clone(),
        telegram.clone(),
        config.owner_chat_id,
    ));

    let state = ApiState {
        db: db_manager.clone(),
        notifier: telegram,
        owner_chat_id: config.owner_chat_id,
        moderation,
    };

    let health_service = HealthService::new(Arc::new(db_manager));
    let app = api::router(state)
        .merge(health_service.router)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(api::cors_layer(config.cors_allowed_origin.as_deref())?),
        );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    log_system_event("HTTP server listening", Some(&format!("port {}", config.http_port)));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log_system_event("Shutdown signal received", None);
}
