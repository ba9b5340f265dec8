//! Liked books

use crate::{
    error::AppResult,
    models::{book::Book, user::User},
    repository::Repository,
};

#[derive(Clone)]
pub struct FavouritesService {
    repository: Repository,
}

impl FavouritesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn favourite(&self, user: &User, book_id: i64) -> AppResult<()> {
        user.require_reader()?;
        self.repository.favourites.add(&user.username, book_id).await?;
        tracing::info!("{} liked book {}", user.username, book_id);
        Ok(())
    }

    pub async fn unfavourite(&self, user: &User, book_id: i64) -> AppResult<()> {
        user.require_reader()?;
        self.repository.favourites.remove(&user.username, book_id).await?;
        tracing::info!("{} unliked book {}", user.username, book_id);
        Ok(())
    }

    pub async fn favourites(&self, user: &User) -> AppResult<Vec<Book>> {
        self.repository.favourites.list_for_user(&user.username).await
    }

    pub async fn is_favourite(&self, user: &User, book_id: i64) -> AppResult<bool> {
        self.repository.favourites.is_favourite(&user.username, book_id).await
    }
}
