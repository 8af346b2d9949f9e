use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::database::connection::DatabaseManager;
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub database: DatabaseHealth,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub status: String,
    pub response_time_ms: u64,
    /// Absent when the store is unreachable.
    pub wish_count: Option<i64>,
}

#[derive(Clone)]
pub struct HealthState {
    pub db: Arc<DatabaseManager>,
    pub start_time: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        let state = HealthState {
            db,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(liveness_check))
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<HealthState>) -> Result<Json<HealthResponse>, StatusCode> {
    let start = std::time::Instant::now();
    let wish_count = count_wishes(&state.db).await.ok();
    let response_time_ms = start.elapsed().as_millis() as u64;

    let Some(wish_count) = wish_count else {
        tracing::warn!("Health check failed: wish store unreachable");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseHealth {
            status: "healthy".to_string(),
            response_time_ms,
            wish_count: Some(wish_count),
        },
        uptime_seconds: uptime,
    }))
}

async fn readiness_check(State(state): State<HealthState>) -> Result<Json<&'static str>, StatusCode> {
    match state.db.ping().await {
        Ok(_) => Ok(Json("ready")),
        Err(_) => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

async fn liveness_check() -> Json<&'static str> {
    Json("alive")
}

async fn count_wishes(db: &DatabaseManager) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM wishes")
        .fetch_one(&db.pool)
        .await
}
