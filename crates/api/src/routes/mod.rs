pub mod auth;
pub mod health;
pub mod subscriptions;

use axum::Router;
use validator::ValidateEmail;

use birthday_common::error::AppError;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(subscriptions::router())
        .with_state(state)
}

/// Trim and lowercase an email, rejecting anything that is not an address.
pub(crate) fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if !email.validate_email() {
        return Err(AppError::Validation("invalid email".to_string()));
    }
    Ok(email)
}
