//! Favourites repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

#[derive(Clone)]
pub struct FavouritesRepository {
    pool: Pool<Sqlite>,
}

impl FavouritesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Books a user has liked
    pub async fn list_for_user(&self, username: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.book_id, b.title, b.author, b.quantity, b.publisher, b.pub_year,
                   b.description, b.edition, b.rating, b.raters
            FROM favourites f
            JOIN books b ON f.book_id = b.book_id
            WHERE f.username = ?
            ORDER BY b.book_id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    pub async fn is_favourite(&self, username: &str, book_id: i64) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favourites WHERE username = ? AND book_id = ?")
            .bind(username)
            .bind(book_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn count_for_user(&self, username: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favourites WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn add(&self, username: &str, book_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let book_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE book_id = ?")
            .bind(book_id)
            .fetch_one(&mut *tx)
            .await?;
        if book_exists == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", book_id)));
        }

        let result = sqlx::query("INSERT OR IGNORE INTO favourites (username, book_id) VALUES (?, ?)")
            .bind(username)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::Conflict("Book is already in your favourites".to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn remove(&self, username: &str, book_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM favourites WHERE username = ? AND book_id = ?")
            .bind(username)
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Book is not in your favourites".to_string()));
        }
        Ok(())
    }
}
