//! HTTP API for birthday-notify.
//!
//! Endpoints:
//! - GET  /health — liveness probe
//! - POST /api/register — create an account
//! - POST /api/login — exchange credentials for a JWT
//! - POST /api/subscribe — follow a colleague's birthday (auth)
//! - POST /api/unsubscribe — stop following a colleague's birthday (auth)

pub mod middleware;
pub mod password;
pub mod routes;
pub mod state;
pub mod users;
