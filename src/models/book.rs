//! Book model, its edit form and borrowed-book rows

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::{AppError, AppResult};

use super::contains_ignore_case;

/// Book from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    /// Copies currently available to borrow
    pub quantity: i64,
    pub publisher: Option<String>,
    pub pub_year: Option<i64>,
    pub description: Option<String>,
    pub edition: Option<i64>,
    /// Running average of all scores
    pub rating: f64,
    pub raters: i64,
}

impl Book {
    /// Case-insensitive substring match on title or author
    pub fn matches(&self, query: &str) -> bool {
        contains_ignore_case(&self.title, query) || contains_ignore_case(&self.author, query)
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    pub fn availability_label(&self) -> &'static str {
        if self.is_available() {
            "Available"
        } else {
            "Not Available"
        }
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1} ({} ratings)", self.rating, self.raters)
    }

    pub fn entry_label(&self) -> String {
        format!("{} - {}", self.author, self.title)
    }
}

/// A book currently checked out by a user
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct BorrowedBook {
    #[sqlx(flatten)]
    pub book: Book,
    pub borrowed_at: DateTime<Utc>,
}

/// Raw text of the add/edit book form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub quantity: String,
    pub publisher: String,
    pub pub_year: String,
    pub edition: String,
    pub description: String,
}

impl BookForm {
    /// Pre-fill the form from an existing book
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            quantity: book.quantity.to_string(),
            publisher: book.publisher.clone().unwrap_or_default(),
            pub_year: book.pub_year.map(|y| y.to_string()).unwrap_or_default(),
            edition: book.edition.map(|e| e.to_string()).unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
        }
    }

    /// Checks run while typing: numeric fields must contain digits only
    pub fn format_error(&self) -> Option<&'static str> {
        if !is_digits_or_empty(&self.quantity) {
            Some("Invalid quantity input")
        } else if !is_digits_or_empty(&self.pub_year) {
            Some("Invalid publication year")
        } else if !is_digits_or_empty(&self.edition) {
            Some("Invalid edition number")
        } else {
            None
        }
    }

    /// Checks run on submit: title, author and quantity are mandatory
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("Title is required")
        } else if self.author.trim().is_empty() {
            Some("Author name is required")
        } else if self.quantity.trim().is_empty() {
            Some("Quantity is required")
        } else {
            None
        }
    }
}

fn is_digits_or_empty(s: &str) -> bool {
    s.trim().chars().all(|c| c.is_ascii_digit())
}

/// Validated book fields ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub quantity: i64,
    pub publisher: Option<String>,
    pub pub_year: Option<i64>,
    pub description: Option<String>,
    pub edition: Option<i64>,
}

impl BookDraft {
    pub fn parse(form: &BookForm) -> AppResult<Self> {
        if let Some(msg) = form.format_error().or_else(|| form.missing_field()) {
            return Err(AppError::Validation(msg.to_string()));
        }

        Ok(Self {
            title: form.title.trim().to_string(),
            author: form.author.trim().to_string(),
            quantity: parse_number(&form.quantity, "Invalid quantity input")?
                .ok_or_else(|| AppError::Validation("Quantity is required".to_string()))?,
            publisher: non_empty(&form.publisher),
            pub_year: parse_number(&form.pub_year, "Invalid publication year")?,
            description: non_empty(&form.description),
            edition: parse_number(&form.edition, "Invalid edition number")?,
        })
    }
}

impl TryFrom<&BookForm> for BookDraft {
    type Error = AppError;

    fn try_from(form: &BookForm) -> Result<Self, Self::Error> {
        BookDraft::parse(form)
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn parse_number(s: &str, message: &str) -> AppResult<Option<i64>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse::<i64>()
        .map(Some)
        .map_err(|_| AppError::Validation(message.to_string()))
}
