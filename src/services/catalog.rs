//! Catalog service: browsing for everyone, editing for administrators

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookDraft, BookForm},
        user::User,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Books whose title or author contains `query`; empty lists all
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_books().await;
        }
        self.repository.books.search(query).await
    }

    pub async fn get_book(&self, book_id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(book_id).await
    }

    pub async fn add_book(&self, actor: &User, form: &BookForm) -> AppResult<Book> {
        actor.require_admin()?;
        let draft = BookDraft::parse(form)?;
        let book = self.repository.books.create(&draft).await?;
        tracing::info!("{} added book {} ({})", actor.username, book.book_id, book.title);
        Ok(book)
    }

    pub async fn update_book(&self, actor: &User, book_id: i64, form: &BookForm) -> AppResult<Book> {
        actor.require_admin()?;
        let draft = BookDraft::parse(form)?;
        let book = self.repository.books.update(book_id, &draft).await?;
        tracing::info!("{} updated book {}", actor.username, book_id);
        Ok(book)
    }

    pub async fn remove_book(&self, actor: &User, book_id: i64) -> AppResult<()> {
        actor.require_admin()?;
        self.repository.books.delete(book_id).await?;
        tracing::info!("{} removed book {}", actor.username, book_id);
        Ok(())
    }
}
