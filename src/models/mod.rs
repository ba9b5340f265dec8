//! Data models for the library system

pub mod book;
pub mod rating;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookForm, BorrowedBook};
pub use rating::Score;
pub use user::{NewUser, Role, User, UserCredentials};

/// Case-insensitive substring test used by every search box
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
