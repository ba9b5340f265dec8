//! User model and related types

use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, FromRow, Sqlite,
};
use validator::Validate;

use crate::error::AppError;

use super::contains_ignore_case;

/// Username of the seeded administrator account
pub const ROOT_USERNAME: &str = "root";

/// Email of the seeded administrator account
pub const ROOT_EMAIL: &str = "root@library.me";

/// Minimum length shared by usernames and passwords
pub const MIN_CREDENTIAL_LENGTH: usize = 4;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Normal,
}

impl Role {
    /// Value stored in the `users.role` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Normal => "Regular",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "regular" | "normal" => Ok(Role::Normal),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

// SQLx conversion for Role
impl sqlx::Type<Sqlite> for Role {
    fn type_info() -> SqliteTypeInfo {
        <str as sqlx::Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <str as sqlx::Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for Role {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as Decode<Sqlite>>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl<'q> Encode<'q, Sqlite> for Role {
    fn encode_by_ref(&self, buf: &mut Vec<SqliteArgumentValue<'q>>) -> IsNull {
        <&str as Encode<'q, Sqlite>>::encode(self.as_str(), buf)
    }
}

/// User as seen by the application; the password never leaves the repository
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_root(&self) -> bool {
        self.username == ROOT_USERNAME
    }

    /// Case-insensitive substring match on username or email
    pub fn matches(&self, query: &str) -> bool {
        contains_ignore_case(&self.username, query) || contains_ignore_case(&self.email, query)
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }

    /// Borrowing and favourites are reserved to normal accounts
    pub fn require_reader(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Err(AppError::Authorization("Administrators cannot borrow or like books".to_string()))
        } else {
            Ok(())
        }
    }
}

/// User row including the stored credential, used for verification only
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl From<UserCredentials> for User {
    fn from(row: UserCredentials) -> Self {
        User {
            username: row.username,
            email: row.email,
            role: row.role,
        }
    }
}

/// Signup request, also used by admins to add accounts
#[derive(Debug, Clone, Default, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 4, message = "Username is too short!"))]
    pub username: String,
    #[validate(length(min = 4, message = "Password is too short!"))]
    pub password: String,
}

impl NewUser {
    pub fn new(email: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }

    /// First validation message for `field`, if any
    pub fn field_error(&self, field: &str) -> Option<String> {
        let errors = self.validate().err()?;
        errors
            .field_errors()
            .get(field)
            .and_then(|errs| errs.first())
            .and_then(|e| e.message.as_ref())
            .map(|m| m.to_string())
    }
}
