//! Borrowing, returning and rating books

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BorrowedBook},
        rating::Score,
        user::User,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn borrow(&self, user: &User, book_id: i64) -> AppResult<Book> {
        user.require_reader()?;
        let book = self.repository.borrows.borrow(&user.username, book_id).await?;
        tracing::info!("{} borrowed book {} ({} left)", user.username, book_id, book.quantity);
        Ok(book)
    }

    pub async fn return_book(&self, user: &User, book_id: i64) -> AppResult<Book> {
        user.require_reader()?;
        let book = self.repository.borrows.return_book(&user.username, book_id).await?;
        tracing::info!("{} returned book {}", user.username, book_id);
        Ok(book)
    }

    pub async fn borrowed(&self, user: &User) -> AppResult<Vec<BorrowedBook>> {
        self.repository.borrows.list_for_user(&user.username).await
    }

    pub async fn is_borrowed(&self, user: &User, book_id: i64) -> AppResult<bool> {
        self.repository.borrows.is_borrowed(&user.username, book_id).await
    }

    /// Score a book the user currently holds
    pub async fn rate(&self, user: &User, book_id: i64, score: Score) -> AppResult<Book> {
        user.require_reader()?;
        if !self.repository.borrows.is_borrowed(&user.username, book_id).await? {
            return Err(AppError::BusinessRule(
                "You can only rate books you have borrowed".to_string(),
            ));
        }
        let book = self.repository.books.rate(book_id, score).await?;
        tracing::info!(
            "{} rated book {} with {} (now {:.2})",
            user.username,
            book_id,
            score.value(),
            book.rating
        );
        Ok(book)
    }
}
