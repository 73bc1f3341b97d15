use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// `subscribers` holds the emails of everyone who asked to be reminded about
/// this user's birthday.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub birthday: NaiveDate,
    pub subscribers: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A user whose birthday falls on the day being notified, together with the
/// addresses subscribed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Celebrant {
    pub id: Uuid,
    pub email: String,
    pub birthday: NaiveDate,
    pub subscribers: Vec<String>,
}
