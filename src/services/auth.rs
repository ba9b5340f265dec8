//! Authentication and account self-service

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use validator::Validate;

use crate::{
    config::UsersConfig,
    error::{AppError, AppResult},
    models::user::{NewUser, Role, User, MIN_CREDENTIAL_LENGTH, ROOT_USERNAME},
    repository::Repository,
};

const LOGIN_FAILED: &str = "Login failed. Wrong credentials!";

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: UsersConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: UsersConfig) -> Self {
        Self { repository, config }
    }

    /// Seed the `root` administrator if the database has none
    pub async fn ensure_root(&self) -> AppResult<()> {
        if self.repository.users.username_exists(ROOT_USERNAME).await? {
            return Ok(());
        }
        let hash = hash_password(&self.config.root_password)?;
        if self.repository.users.create_root(&hash).await? {
            tracing::info!("Seeded root administrator account");
        }
        Ok(())
    }

    /// Register a new normal account
    pub async fn signup(&self, new_user: NewUser) -> AppResult<User> {
        self.check_new_user(&new_user, Role::Normal).await
    }

    /// Create an account with the given role after the signup checks
    pub(crate) async fn check_new_user(&self, new_user: &NewUser, role: Role) -> AppResult<User> {
        if let Some(problem) = self.signup_problem(new_user, true).await? {
            return Err(problem);
        }
        new_user.validate()?;

        let hash = hash_password(&new_user.password)?;
        let user = self.repository.users.create(new_user, &hash, role).await?;
        tracing::info!("Created {} account {}", user.role, user.username);
        Ok(user)
    }

    /// Message for the first problem with a signup form. With `complete`
    /// false, empty fields are skipped so the message tracks what has been
    /// typed so far.
    pub async fn validate_signup(&self, new_user: &NewUser, complete: bool) -> AppResult<Option<String>> {
        Ok(self
            .signup_problem(new_user, complete)
            .await?
            .map(|problem| problem.user_message()))
    }

    async fn signup_problem(&self, new_user: &NewUser, complete: bool) -> AppResult<Option<AppError>> {
        let check = |value: &str| complete || !value.is_empty();

        if check(&new_user.username) {
            if let Some(message) = new_user.field_error("username") {
                return Ok(Some(AppError::Validation(message)));
            }
            if self.repository.users.username_exists(&new_user.username).await? {
                return Ok(Some(AppError::Conflict("Username is taken!".to_string())));
            }
        }

        if check(&new_user.password) {
            if let Some(message) = new_user.field_error("password") {
                return Ok(Some(AppError::Validation(message)));
            }
        }

        if check(&new_user.email) {
            if let Some(message) = new_user.field_error("email") {
                return Ok(Some(AppError::Validation(message)));
            }
            if self.repository.users.email_exists(&new_user.email).await? {
                return Ok(Some(AppError::Conflict("Email is used before!".to_string())));
            }
        }

        Ok(None)
    }

    /// Verify credentials. Every failure reports the same message.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let credentials = self
            .repository
            .users
            .get_credentials(username)
            .await?
            .ok_or_else(|| AppError::Authentication(LOGIN_FAILED.to_string()))?;

        match verify_password(&credentials.password, password)? {
            PasswordCheck::Valid => {}
            PasswordCheck::ValidLegacy => {
                let hash = hash_password(password)?;
                self.repository.users.update_password(username, &hash).await?;
                tracing::info!("Upgraded stored password of {} to argon2", username);
            }
            PasswordCheck::Invalid => {
                tracing::info!("Failed login for {}", username);
                return Err(AppError::Authentication(LOGIN_FAILED.to_string()));
            }
        }

        tracing::info!("User {} logged in", username);
        Ok(credentials.into())
    }

    pub async fn change_password(&self, user: &User, new_password: &str) -> AppResult<()> {
        if new_password.chars().count() < MIN_CREDENTIAL_LENGTH {
            return Err(AppError::Validation("Password too short".to_string()));
        }
        let hash = hash_password(new_password)?;
        self.repository.users.update_password(&user.username, &hash).await?;
        tracing::info!("User {} changed password", user.username);
        Ok(())
    }

    /// Self-service deletion; the root account cannot remove itself
    pub async fn delete_account(&self, user: &User) -> AppResult<()> {
        if user.is_root() {
            return Err(AppError::BusinessRule("The root account cannot be deleted".to_string()));
        }
        self.repository.users.delete(&user.username).await?;
        tracing::info!("User {} deleted their account", user.username);
        Ok(())
    }
}

/// Outcome of checking a password against the stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Valid,
    /// Matched a plain-text value written before hashing was introduced
    ValidLegacy,
    Invalid,
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

pub fn verify_password(stored: &str, password: &str) -> AppResult<PasswordCheck> {
    match PasswordHash::new(stored) {
        Ok(parsed) => Ok(if Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok() {
            PasswordCheck::Valid
        } else {
            PasswordCheck::Invalid
        }),
        Err(_) if !stored.starts_with('$') => Ok(if stored == password {
            PasswordCheck::ValidLegacy
        } else {
            PasswordCheck::Invalid
        }),
        Err(_) => Err(AppError::Internal("Invalid password hash".to_string())),
    }
}
