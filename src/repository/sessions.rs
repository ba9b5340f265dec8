//! Sessions repository: one active token per user

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::user::User};

#[derive(Clone)]
pub struct SessionsRepository {
    pool: Pool<Sqlite>,
}

impl SessionsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Store `token` as the user's session, replacing any previous one
    pub async fn create(&self, username: &str, token: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM sessions WHERE username = ?")
            .bind(username)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO sessions (username, token, created_at) VALUES (?, ?, ?)")
            .bind(username)
            .bind(token)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// User owning `token`, if the session still exists
    pub async fn restore(&self, token: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.username, u.email, u.role
            FROM users u
            JOIN sessions s ON u.username = s.username
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn token_for(&self, username: &str) -> AppResult<Option<String>> {
        let token = sqlx::query_scalar::<_, String>("SELECT token FROM sessions WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(token)
    }

    pub async fn clear(&self, username: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
