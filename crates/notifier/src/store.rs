//! Celebrant lookup — who has a birthday on a given day, and who follows them.

use async_trait::async_trait;
use sqlx::PgPool;

use birthday_common::error::AppError;
use birthday_common::types::Celebrant;

/// Source of today's celebrants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CelebrantSource: Send + Sync {
    /// Users whose birthday falls on `day` of `month` (1-based), with their subscribers.
    async fn find_celebrants(&self, day: u32, month: u32) -> Result<Vec<Celebrant>, AppError>;
}

/// PostgreSQL-backed celebrant lookup over the `users` table.
#[derive(Clone)]
pub struct PgCelebrantSource {
    pool: PgPool,
}

impl PgCelebrantSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CelebrantSource for PgCelebrantSource {
    async fn find_celebrants(&self, day: u32, month: u32) -> Result<Vec<Celebrant>, AppError> {
        let celebrants: Vec<Celebrant> = sqlx::query_as(
            r#"
            SELECT id, email, birthday, subscribers
            FROM users
            WHERE EXTRACT(DAY FROM birthday)::int = $1
              AND EXTRACT(MONTH FROM birthday)::int = $2
            ORDER BY created_at
            "#,
        )
        .bind(day as i32)
        .bind(month as i32)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(day, month, count = celebrants.len(), "Fetched celebrants");

        Ok(celebrants)
    }
}
