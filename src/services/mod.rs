//! Business logic services

pub mod auth;
pub mod catalog;
pub mod favourites;
pub mod loans;
pub mod sessions;
pub mod users;

use crate::{config::AppConfig, repository::Repository, session::SessionFile};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub sessions: sessions::SessionService,
    pub catalog: catalog::CatalogService,
    pub users: users::UsersService,
    pub loans: loans::LoansService,
    pub favourites: favourites::FavouritesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let auth = auth::AuthService::new(repository.clone(), config.users.clone());
        Self {
            sessions: sessions::SessionService::new(
                repository.clone(),
                SessionFile::new(config.session.file.clone()),
            ),
            catalog: catalog::CatalogService::new(repository.clone()),
            users: users::UsersService::new(repository.clone(), auth.clone(), config.users.clone()),
            loans: loans::LoansService::new(repository.clone()),
            favourites: favourites::FavouritesService::new(repository),
            auth,
        }
    }
}
