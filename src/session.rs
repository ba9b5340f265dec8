//! Active session and the on-disk session token

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::{error::AppResult, models::user::User};

/// The authenticated user context of the running process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub user: User,
}

impl ActiveSession {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    pub fn home(&self) -> Home {
        Home::for_user(&self.user)
    }
}

/// Which home screen a user lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Home {
    Admin,
    Normal,
}

impl Home {
    pub fn for_user(user: &User) -> Self {
        if user.is_admin() {
            Home::Admin
        } else {
            Home::Normal
        }
    }
}

/// File holding the token of the last session
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored token; a missing or blank file means no session
    pub async fn read(&self) -> AppResult<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn write(&self, token: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, token).await?;
        Ok(())
    }

    pub async fn clear(&self) -> AppResult<()> {
        match fs::write(&self.path, "").await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
