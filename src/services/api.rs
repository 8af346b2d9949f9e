//! Public HTTP surface: guest submissions, the wish feed and the Telegram webhook.

use anyhow::{anyhow, Result};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::bot::handlers::{webhook::WebhookUpdate, BotHandler};
use crate::database::{connection::DatabaseManager, models::Wish};
use crate::services::notifier::Notifier;
use crate::utils::logging::log_database_error;
use crate::utils::sanitize::{clean_field, Field};

#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseManager,
    pub notifier: Arc<dyn Notifier>,
    pub owner_chat_id: i64,
    pub moderation: Arc<BotHandler>,
}

#[derive(Debug, Deserialize)]
pub struct NewWish {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

/// Error body `{"error": "..."}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }

    fn database() -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: "database error".to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/wishes", get(list_wishes))
        .route("/api/wish", post(add_wish))
        .route("/telegram", post(telegram_webhook).fallback(ignore_request))
        .with_state(state)
}

/// CORS for the guest frontend; `None` allows any origin.
pub fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match allowed_origin {
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|_| anyhow!("Invalid CORS_ALLOWED_ORIGIN: {}", origin))?;
            Ok(layer.allow_origin(origin).allow_credentials(true))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

async fn list_wishes(State(state): State<ApiState>) -> Result<Json<Vec<Wish>>, ApiError> {
    match Wish::list_all(&state.db.pool).await {
        Ok(wishes) => Ok(Json(wishes)),
        Err(e) => {
            log_database_error("SELECT", "wishes", &e.to_string(), None);
            Err(ApiError::database())
        }
    }
}

async fn add_wish(
    State(state): State<ApiState>,
    payload: Result<Json<NewWish>, JsonRejection>,
) -> Result<(StatusCode, Json<Wish>), ApiError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected wish payload: {}", e);
        ApiError::bad_request("invalid JSON")
    })?;

    let name = clean_field(&payload.name, Field::Name)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let message = clean_field(&payload.message, Field::Message)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let wish = match Wish::create(&state.db.pool, name, message).await {
        Ok(wish) => wish,
        Err(e) => {
            log_database_error("INSERT", "wishes", &e.to_string(), None);
            return Err(ApiError::database());
        }
    };

    tracing::info!("New wish #{} stored", wish.id);
    spawn_new_wish_notification(&state, &wish);

    Ok((StatusCode::CREATED, Json(wish)))
}

/// Notifies the owner from a detached task.
///
/// The guest's response never waits for Telegram, and the outcome of the
/// delivery is not observed by anyone.
fn spawn_new_wish_notification(state: &ApiState, wish: &Wish) {
    let notifier = Arc::clone(&state.notifier);
    let owner_chat_id = state.owner_chat_id;
    let text = format!(
        "💌 <b>New wish</b>\n\n<b>Guest:</b> {}\n<i>{}</i>",
        wish.name, wish.message
    );

    tokio::spawn(async move {
        notifier.send_text(owner_chat_id, &text).await;
    });
}

/// Always answers 200 so Telegram doesn't redeliver the update.
async fn telegram_webhook(State(state): State<ApiState>, body: Bytes) -> StatusCode {
    match serde_json::from_slice::<WebhookUpdate>(&body) {
        Ok(update) => state.moderation.handle_update(update).await,
        Err(e) => tracing::warn!("Failed to parse webhook update: {}", e),
    }
    StatusCode::OK
}

async fn ignore_request() -> StatusCode {
    StatusCode::OK
}
