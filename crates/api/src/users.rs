//! User service — account creation and birthday subscriptions.
//!
//! Subscriptions are stored on the user being followed: `subscribers` holds
//! the emails of everyone who wants a reminder on that user's birthday.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use birthday_common::error::AppError;
use birthday_common::types::User;

/// Postgres error code for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Service layer for user accounts and subscriptions.
pub struct UserService;

impl UserService {
    /// Create a new user. Fails with `Conflict` if the email is taken.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        birthday: NaiveDate,
    ) -> Result<User, AppError> {
        let result: Result<User, sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO users (id, email, password_hash, birthday)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(birthday)
        .fetch_one(pool)
        .await;

        let user = match result {
            Ok(user) => user,
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                return Err(AppError::Conflict("user already exists".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %user.id, email = %user.email, "User created");

        Ok(user)
    }

    /// Get a single user by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<User, AppError> {
        let user: User = sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user with email {} not found", email)))?;

        Ok(user)
    }

    /// Subscribe `subscriber_email` to `target_email`'s birthday.
    pub async fn add_subscriber(
        pool: &PgPool,
        target_email: &str,
        subscriber_email: &str,
    ) -> Result<(), AppError> {
        let target = Self::find_by_email(pool, target_email).await?;
        if target.subscribers.iter().any(|s| s == subscriber_email) {
            return Err(AppError::Conflict("already subscribed".to_string()));
        }

        // The NOT ANY guard keeps a concurrent duplicate request from appending twice.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET subscribers = array_append(subscribers, $2)
            WHERE id = $1 AND NOT ($2 = ANY(subscribers))
            "#,
        )
        .bind(target.id)
        .bind(subscriber_email)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict("already subscribed".to_string()));
        }

        tracing::info!(
            target = %target_email,
            subscriber = %subscriber_email,
            "Subscription created"
        );

        Ok(())
    }

    /// Remove `subscriber_email` from `target_email`'s subscribers.
    pub async fn remove_subscriber(
        pool: &PgPool,
        target_email: &str,
        subscriber_email: &str,
    ) -> Result<(), AppError> {
        let target = Self::find_by_email(pool, target_email).await?;
        if !target.subscribers.iter().any(|s| s == subscriber_email) {
            return Err(AppError::Validation("you are not a subscriber".to_string()));
        }

        sqlx::query("UPDATE users SET subscribers = array_remove(subscribers, $2) WHERE id = $1")
            .bind(target.id)
            .bind(subscriber_email)
            .execute(pool)
            .await?;

        tracing::info!(
            target = %target_email,
            subscriber = %subscriber_email,
            "Subscription removed"
        );

        Ok(())
    }
}
