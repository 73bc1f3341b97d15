pub mod auth;
pub mod layers;
