//! Users repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::user::{NewUser, Role, User, UserCredentials, ROOT_EMAIL, ROOT_USERNAME},
};

use super::like_pattern;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Sqlite>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get user by username
    pub async fn get_by_username(&self, username: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT username, email, role FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))
    }

    /// Get the stored credential for a username
    pub async fn get_credentials(&self, username: &str) -> AppResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, UserCredentials>(
            "SELECT username, email, role, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Check if username already exists
    pub async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE LOWER(email) = LOWER(?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// All users except the seeded root account
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT username, email, role FROM users WHERE username != ? ORDER BY username",
        )
        .bind(ROOT_USERNAME)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Substring search on username or email, root excluded
    pub async fn search(&self, query: &str) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT username, email, role
            FROM users
            WHERE username != ?1
              AND (LOWER(username) LIKE ?2 ESCAPE '\' OR LOWER(email) LIKE ?2 ESCAPE '\')
            ORDER BY username
            "#,
        )
        .bind(ROOT_USERNAME)
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Create a new user with an already hashed password
    pub async fn create(&self, user: &NewUser, password_hash: &str, role: Role) -> AppResult<User> {
        sqlx::query("INSERT INTO users (username, email, password, role) VALUES (?, ?, ?, ?)")
            .bind(&user.username)
            .bind(&user.email)
            .bind(password_hash)
            .bind(role)
            .execute(&self.pool)
            .await?;

        self.get_by_username(&user.username).await
    }

    /// Seed the root administrator. Returns false when it already exists.
    pub async fn create_root(&self, password_hash: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO users (username, email, password, role) VALUES (?, ?, ?, ?)",
        )
        .bind(ROOT_USERNAME)
        .bind(ROOT_EMAIL)
        .bind(password_hash)
        .bind(Role::Admin)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user; favourites, borrows and session go with it
    pub async fn delete(&self, username: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", username)));
        }
        Ok(())
    }

    /// Replace the stored password hash
    pub async fn update_password(&self, username: &str, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE username = ?")
            .bind(password_hash)
            .bind(username)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", username)));
        }
        Ok(())
    }

    /// Change a user's role. With `clear_relations`, their borrows (returning
    /// the copies) and favourites are dropped in the same transaction.
    pub async fn set_role(&self, username: &str, role: Role, clear_relations: bool) -> AppResult<User> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_scalar::<_, Role>("SELECT role FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

        if current != role {
            sqlx::query("UPDATE users SET role = ? WHERE username = ?")
                .bind(role)
                .bind(username)
                .execute(&mut *tx)
                .await?;

            if clear_relations {
                sqlx::query("DELETE FROM borrows WHERE username = ?")
                    .bind(username)
                    .execute(&mut *tx)
                    .await?;
                sqlx::query("DELETE FROM favourites WHERE username = ?")
                    .bind(username)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let user = sqlx::query_as::<_, User>("SELECT username, email, role FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }
}
