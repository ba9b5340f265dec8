//! Session persistence across runs

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::user::User,
    repository::Repository,
    session::SessionFile,
};

#[derive(Clone)]
pub struct SessionService {
    repository: Repository,
    file: SessionFile,
}

impl SessionService {
    pub fn new(repository: Repository, file: SessionFile) -> Self {
        Self { repository, file }
    }

    /// Mint a token for `user`, replacing any previous session
    pub async fn start(&self, user: &User) -> AppResult<String> {
        let token = Uuid::new_v4().simple().to_string();
        self.repository.sessions.create(&user.username, &token).await?;
        self.file.write(&token).await?;
        tracing::debug!("Started session for {}", user.username);
        Ok(token)
    }

    /// User of the saved session, if it is still valid
    pub async fn restore(&self) -> AppResult<Option<User>> {
        let Some(token) = self.file.read().await? else {
            tracing::debug!("No saved session");
            return Ok(None);
        };

        match self.repository.sessions.restore(&token).await? {
            Some(user) => {
                tracing::info!("Restored session for {}", user.username);
                Ok(Some(user))
            }
            None => {
                tracing::debug!("Saved session token is stale");
                self.file.clear().await?;
                Ok(None)
            }
        }
    }

    /// Log out: forget the session in the database and on disk
    pub async fn end(&self, user: &User) -> AppResult<()> {
        self.repository.sessions.clear(&user.username).await?;
        self.file.clear().await?;
        tracing::info!("User {} logged out", user.username);
        Ok(())
    }

    /// Drop whatever session was saved, without logging anyone in
    pub async fn discard_file(&self) -> AppResult<()> {
        if let Some(token) = self.file.read().await? {
            if let Some(user) = self.repository.sessions.restore(&token).await? {
                self.repository.sessions.clear(&user.username).await?;
            }
        }
        self.file.clear().await
    }
}
