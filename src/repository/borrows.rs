//! Borrows repository for database operations
//!
//! Quantity bookkeeping is done by the `decrease_book_quantity` and
//! `increase_book_quantity` triggers; every statement here runs inside a
//! transaction so the borrow row and the stock change commit together.

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BorrowedBook},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Sqlite>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Books currently borrowed by a user, oldest first
    pub async fn list_for_user(&self, username: &str) -> AppResult<Vec<BorrowedBook>> {
        let books = sqlx::query_as::<_, BorrowedBook>(
            r#"
            SELECT b.book_id, b.title, b.author, b.quantity, b.publisher, b.pub_year,
                   b.description, b.edition, b.rating, b.raters, br.borrowed_at
            FROM borrows br
            JOIN books b ON br.book_id = b.book_id
            WHERE br.username = ?
            ORDER BY br.borrowed_at, b.book_id
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    pub async fn is_borrowed(&self, username: &str, book_id: i64) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE username = ? AND book_id = ?")
            .bind(username)
            .bind(book_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn count_for_user(&self, username: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Check out one copy. Fails without writing anything when the user
    /// already holds the book or no copy is left.
    pub async fn borrow(&self, username: &str, book_id: i64) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let quantity: i64 = sqlx::query_scalar("SELECT quantity FROM books WHERE book_id = ?")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        let already: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE username = ? AND book_id = ?")
            .bind(username)
            .bind(book_id)
            .fetch_one(&mut *tx)
            .await?;

        if already > 0 {
            return Err(AppError::BusinessRule("You have already borrowed this book".to_string()));
        }

        if quantity <= 0 {
            return Err(AppError::BusinessRule("No copies of this book are available".to_string()));
        }

        sqlx::query("INSERT INTO borrows (username, book_id, borrowed_at) VALUES (?, ?, ?)")
            .bind(username)
            .bind(book_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        let book = fetch_book(&mut tx, book_id).await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Give back one copy
    pub async fn return_book(&self, username: &str, book_id: i64) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM borrows WHERE username = ? AND book_id = ?")
            .bind(username)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("This book is not borrowed by you".to_string()));
        }

        let book = fetch_book(&mut tx, book_id).await?;

        tx.commit().await?;
        Ok(book)
    }
}

async fn fetch_book(tx: &mut sqlx::Transaction<'_, Sqlite>, book_id: i64) -> AppResult<Book> {
    let book = sqlx::query_as::<_, Book>(
        r#"
        SELECT book_id, title, author, quantity, publisher, pub_year, description, edition, rating, raters
        FROM books WHERE book_id = ?
        "#,
    )
    .bind(book_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(book)
}
