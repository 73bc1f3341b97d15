//! Birthday subscription routes.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use birthday_common::error::AppError;

use crate::middleware::auth::AuthUser;
use crate::routes::normalize_email;
use crate::state::AppState;
use crate::users::UserService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/subscribe", post(subscribe))
        .route("/api/unsubscribe", post(unsubscribe))
}

/// Request body naming the colleague whose birthday to follow.
#[derive(Debug, Deserialize)]
pub struct SubscriptionRequest {
    pub email: String,
}

/// POST /api/subscribe — Get reminded about a colleague's birthday.
async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SubscriptionRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let target = normalize_email(&req.email)?;
    if target == auth.email {
        return Err(AppError::Validation("can't subscribe to yourself".to_string()));
    }

    UserService::add_subscriber(&state.pool, &target, &auth.email).await?;
    Ok(Json(json!({ "message": "subscribe created" })))
}

/// POST /api/unsubscribe — Stop birthday reminders for a colleague.
async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SubscriptionRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let target = normalize_email(&req.email)?;
    if target == auth.email {
        return Err(AppError::Validation(
            "can't unsubscribe from yourself".to_string(),
        ));
    }

    UserService::remove_subscriber(&state.pool, &target, &auth.email).await?;
    Ok(Json(json!({ "message": "unsubscribe successfully" })))
}
