//! Authentication routes — registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use birthday_common::error::AppError;

use crate::middleware::auth::encode_jwt;
use crate::password::{MIN_PASSWORD_LEN, hash_password, verify_password};
use crate::routes::normalize_email;
use crate::state::AppState;
use crate::users::UserService;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Birthday as `YYYY-MM-DD`
    pub birthday: NaiveDate,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// POST /api/register — Create a user account.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let email = normalize_email(&req.email)?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation("password too short".to_string()));
    }

    let password_hash = hash_password(req.password).await?;
    UserService::create(&state.pool, &email, &password_hash, req.birthday).await?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "user created" }))))
}

/// POST /api/login — Verify credentials and return a JWT.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let invalid = || AppError::Auth("incorrect email or password".to_string());

    let email = normalize_email(&req.email).map_err(|_| invalid())?;
    let user = match UserService::find_by_email(&state.pool, &email).await {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => return Err(invalid()),
        Err(e) => return Err(e),
    };

    if !verify_password(req.password, user.password_hash.clone()).await? {
        return Err(invalid());
    }

    let token = encode_jwt(
        &user.email,
        user.birthday,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        message: "Success login".to_string(),
        token,
    }))
}
