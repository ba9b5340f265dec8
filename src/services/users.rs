//! User management for administrators

use crate::{
    config::UsersConfig,
    error::{AppError, AppResult},
    models::user::{NewUser, Role, User},
    repository::Repository,
};

use super::auth::AuthService;

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    auth: AuthService,
    config: UsersConfig,
}

impl UsersService {
    pub fn new(repository: Repository, auth: AuthService, config: UsersConfig) -> Self {
        Self { repository, auth, config }
    }

    /// Every account except root
    pub async fn list_users(&self, actor: &User) -> AppResult<Vec<User>> {
        actor.require_admin()?;
        self.repository.users.list().await
    }

    pub async fn search_users(&self, actor: &User, query: &str) -> AppResult<Vec<User>> {
        actor.require_admin()?;
        let query = query.trim();
        if query.is_empty() {
            return self.repository.users.list().await;
        }
        self.repository.users.search(query).await
    }

    /// Create a normal account with the same checks as signup
    pub async fn add_user(&self, actor: &User, new_user: NewUser) -> AppResult<User> {
        actor.require_admin()?;
        self.auth.check_new_user(&new_user, Role::Normal).await
    }

    pub async fn remove_user(&self, actor: &User, username: &str) -> AppResult<()> {
        actor.require_admin()?;
        let target = self.repository.users.get_by_username(username).await?;
        if target.is_root() {
            return Err(AppError::BusinessRule("The root account cannot be removed".to_string()));
        }
        if target.username == actor.username {
            return Err(AppError::BusinessRule(
                "Use My account to delete your own account".to_string(),
            ));
        }
        self.repository.users.delete(username).await?;
        tracing::info!("{} removed user {}", actor.username, username);
        Ok(())
    }

    /// Grant admin rights
    pub async fn promote(&self, actor: &User, username: &str) -> AppResult<User> {
        actor.require_admin()?;
        let user = self
            .repository
            .users
            .set_role(username, Role::Admin, self.config.clear_relations_on_role_change)
            .await?;
        tracing::info!("{} granted admin rights to {}", actor.username, username);
        Ok(user)
    }

    /// Revoke admin rights. The flag is true when the actor demoted
    /// themself and must be logged out.
    pub async fn demote(&self, actor: &User, username: &str) -> AppResult<(User, bool)> {
        actor.require_admin()?;
        let target = self.repository.users.get_by_username(username).await?;
        if target.is_root() {
            return Err(AppError::BusinessRule(
                "The root account always keeps admin rights".to_string(),
            ));
        }
        let user = self
            .repository
            .users
            .set_role(username, Role::Normal, self.config.clear_relations_on_role_change)
            .await?;
        tracing::info!("{} revoked admin rights of {}", actor.username, username);
        Ok((user, username == actor.username))
    }
}
