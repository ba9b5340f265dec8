//! Home screen of a normal (reader) account

use crossterm::event::{KeyCode, KeyEvent};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BorrowedBook},
        rating::{Score, MAX_SCORE, MIN_SCORE},
        user::User,
    },
    services::Services,
};

use crate::tui::{
    app::Transition,
    list::{ListAction, SearchableList},
};

pub const MENU: [&str; 4] = ["All books", "Borrowed", "Favourites", "My account"];
pub const ALL_BOOKS: usize = 0;
pub const BORROWED: usize = 1;
pub const FAVOURITES: usize = 2;

/// Star picker for a borrowed book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingDialog {
    pub book_id: i64,
    pub title: String,
    pub score: u8,
}

impl RatingDialog {
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Down => self.score = self.score.saturating_sub(1).max(MIN_SCORE),
            KeyCode::Right | KeyCode::Up => self.score = (self.score + 1).min(MAX_SCORE),
            KeyCode::Char(c) => {
                if let Some(digit) = c.to_digit(10) {
                    if (u32::from(MIN_SCORE)..=u32::from(MAX_SCORE)).contains(&digit) {
                        self.score = digit as u8;
                    }
                }
            }
            _ => {}
        }
    }
}

#[derive(Default)]
pub struct NormalHome {
    pub books: SearchableList<Book>,
    pub borrowed: SearchableList<BorrowedBook>,
    pub favourites: SearchableList<Book>,
    pub rating: Option<RatingDialog>,
}

impl NormalHome {
    pub async fn load(services: &Services, user: &User) -> AppResult<Self> {
        let mut home = Self::default();
        home.reload(services, user).await?;
        Ok(home)
    }

    pub async fn reload(&mut self, services: &Services, user: &User) -> AppResult<()> {
        self.books.replace(services.catalog.list_books().await?);
        self.borrowed.replace(services.loans.borrowed(user).await?);
        self.favourites.replace(services.favourites.favourites(user).await?);
        Ok(())
    }

    pub fn selected_book(&self, tab: usize) -> Option<&Book> {
        match tab {
            ALL_BOOKS => self.books.selected(),
            BORROWED => self.borrowed.selected().map(|b| &b.book),
            FAVOURITES => self.favourites.selected(),
            _ => None,
        }
    }

    fn list_key(&mut self, tab: usize, key: KeyEvent) -> ListAction {
        match tab {
            ALL_BOOKS => self.books.handle_key(key),
            BORROWED => self.borrowed.handle_key(key),
            FAVOURITES => self.favourites.handle_key(key),
            _ => ListAction::Ignored,
        }
    }

    pub async fn handle_key(
        &mut self,
        tab: usize,
        key: KeyEvent,
        services: &Services,
        user: &User,
    ) -> AppResult<Transition> {
        if let Some(dialog) = self.rating.as_mut() {
            match key.code {
                KeyCode::Esc => self.rating = None,
                KeyCode::Enter => {
                    let book_id = dialog.book_id;
                    let score = Score::new(dialog.score)?;
                    self.rating = None;
                    let book = services.loans.rate(user, book_id, score).await?;
                    self.reload(services, user).await?;
                    return Ok(Transition::Notice(format!(
                        "Rated {} {}, average now {}",
                        book.title,
                        score.stars(),
                        book.rating_label()
                    )));
                }
                _ => dialog.handle_key(key),
            }
            return Ok(Transition::Stay);
        }

        if self.list_key(tab, key) == ListAction::Handled {
            return Ok(Transition::Stay);
        }
        if key.code == KeyCode::Esc {
            return Ok(Transition::Menu);
        }

        let Some(book) = self.selected_book(tab).cloned() else {
            return Ok(Transition::Stay);
        };

        let notice = match key.code {
            KeyCode::Char('b') => {
                services.loans.borrow(user, book.book_id).await?;
                format!("Borrowed {}", book.title)
            }
            KeyCode::Char('r') => {
                services.loans.return_book(user, book.book_id).await?;
                format!("Returned {}", book.title)
            }
            KeyCode::Char('l') => {
                services.favourites.favourite(user, book.book_id).await?;
                format!("Added {} to favourites", book.title)
            }
            KeyCode::Char('u') => {
                services.favourites.unfavourite(user, book.book_id).await?;
                format!("Removed {} from favourites", book.title)
            }
            KeyCode::Char('s') => {
                if !services.loans.is_borrowed(user, book.book_id).await? {
                    return Err(AppError::BusinessRule(
                        "You can only rate books you have borrowed".to_string(),
                    ));
                }
                self.rating = Some(RatingDialog {
                    book_id: book.book_id,
                    title: book.title,
                    score: MAX_SCORE,
                });
                return Ok(Transition::Stay);
            }
            _ => return Ok(Transition::Stay),
        };

        self.reload(services, user).await?;
        Ok(Transition::Notice(notice))
    }
}
