//! Screen view-models and their key handlers

pub mod account;
pub mod admin;
pub mod home;
pub mod login;
pub mod normal;

use crossterm::event::{KeyCode, KeyEvent};

/// Yes/no question guarding an irreversible action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm<A> {
    pub prompt: String,
    pub action: A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Pending,
}

impl<A> Confirm<A> {
    pub fn new(prompt: impl Into<String>, action: A) -> Self {
        Self {
            prompt: prompt.into(),
            action,
        }
    }

    pub fn answer(key: KeyEvent) -> Answer {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Answer::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Answer::No,
            _ => Answer::Pending,
        }
    }
}
