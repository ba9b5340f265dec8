//! Books repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDraft},
        rating::{running_average, Score},
    },
};

use super::like_pattern;

const BOOK_COLUMNS: &str =
    "book_id, title, author, quantity, publisher, pub_year, description, edition, rating, raters";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// All books in catalog order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY book_id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Substring search on title or author
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            r#"
            SELECT {}
            FROM books
            WHERE LOWER(title) LIKE ?1 ESCAPE '\' OR LOWER(author) LIKE ?1 ESCAPE '\'
            ORDER BY book_id
            "#,
            BOOK_COLUMNS
        ))
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, book_id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE book_id = ?", BOOK_COLUMNS))
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a new book with no ratings yet
    pub async fn create(&self, draft: &BookDraft) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, quantity, publisher, pub_year, description, edition, rating, raters)
            VALUES (?, ?, ?, ?, ?, ?, ?, 0, 0)
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(draft.quantity)
        .bind(&draft.publisher)
        .bind(draft.pub_year)
        .bind(&draft.description)
        .bind(draft.edition)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    /// Overwrite the editable fields of a book; rating is left untouched
    pub async fn update(&self, book_id: i64, draft: &BookDraft) -> AppResult<Book> {
        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = ?1, author = ?2, quantity = ?3, publisher = ?4,
                pub_year = ?5, description = ?6, edition = ?7
            WHERE book_id = ?8
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(draft.quantity)
        .bind(&draft.publisher)
        .bind(draft.pub_year)
        .bind(&draft.description)
        .bind(draft.edition)
        .bind(book_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", book_id)));
        }
        self.get_by_id(book_id).await
    }

    /// Delete a book; its borrows and favourites go with it
    pub async fn delete(&self, book_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE book_id = ?")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", book_id)));
        }
        Ok(())
    }

    /// Add one score to the running average
    pub async fn rate(&self, book_id: i64, score: Score) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let (rating, raters): (f64, i64) =
            sqlx::query_as("SELECT rating, raters FROM books WHERE book_id = ?")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        sqlx::query("UPDATE books SET rating = ?, raters = raters + 1 WHERE book_id = ?")
            .bind(running_average(rating, raters, score))
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        let book = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE book_id = ?", BOOK_COLUMNS))
            .bind(book_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(book)
    }
}
