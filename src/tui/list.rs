//! Selectable lists with an inline search box

use crossterm::event::{KeyCode, KeyEvent};

use crate::models::{Book, BorrowedBook, User};

/// Something a search box can filter
pub trait Searchable {
    fn matches(&self, query: &str) -> bool;
    fn label(&self) -> String;
}

impl Searchable for Book {
    fn matches(&self, query: &str) -> bool {
        Book::matches(self, query)
    }

    fn label(&self) -> String {
        self.entry_label()
    }
}

impl Searchable for BorrowedBook {
    fn matches(&self, query: &str) -> bool {
        self.book.matches(query)
    }

    fn label(&self) -> String {
        self.book.entry_label()
    }
}

impl Searchable for User {
    fn matches(&self, query: &str) -> bool {
        User::matches(self, query)
    }

    fn label(&self) -> String {
        self.username.clone()
    }
}

/// Outcome of a key handled by the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// Key consumed by navigation or the search box
    Handled,
    /// Key left for the caller
    Ignored,
}

#[derive(Debug, Clone)]
pub struct SearchableList<T> {
    items: Vec<T>,
    pub query: String,
    pub searching: bool,
    selected: usize,
}

impl<T> Default for SearchableList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            query: String::new(),
            searching: false,
            selected: 0,
        }
    }
}

impl<T: Searchable> SearchableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Swap in fresh items, keeping the query and clamping the selection
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp();
    }

    pub fn visible(&self) -> Vec<&T> {
        self.items.iter().filter(|item| item.matches(&self.query)).collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.visible().is_empty()).then_some(self.selected)
    }

    pub fn selected(&self) -> Option<&T> {
        self.visible().get(self.selected).copied()
    }

    fn clamp(&mut self) {
        let len = self.visible().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ListAction {
        if self.searching {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.searching = false,
                KeyCode::Backspace => {
                    self.query.pop();
                }
                KeyCode::Char(c) => self.query.push(c),
                KeyCode::Up | KeyCode::Down => return self.navigate(key.code),
                _ => {}
            }
            self.clamp();
            return ListAction::Handled;
        }

        match key.code {
            KeyCode::Char('/') => {
                self.searching = true;
                ListAction::Handled
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Home | KeyCode::End => self.navigate(key.code),
            _ => ListAction::Ignored,
        }
    }

    fn navigate(&mut self, code: KeyCode) -> ListAction {
        let len = self.visible().len();
        if len > 0 {
            self.selected = match code {
                KeyCode::Up => self.selected.saturating_sub(1),
                KeyCode::Down => (self.selected + 1).min(len - 1),
                KeyCode::Home => 0,
                KeyCode::End => len - 1,
                _ => self.selected,
            };
        }
        ListAction::Handled
    }
}
