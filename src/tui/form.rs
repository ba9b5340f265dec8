//! Text input forms

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl Field {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::text(label)
        }
    }

    /// Value as it should be drawn
    pub fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// What a key did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Edited,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focused: usize,
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields, focused: 0 }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focused = 0;
    }

    fn next(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len().max(1);
    }

    fn previous(&mut self) {
        let len = self.fields.len().max(1);
        self.focused = (self.focused + len - 1) % len;
    }

    /// Enter moves to the next field and submits from the last one;
    /// Ctrl-S submits from anywhere.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => FormAction::Cancel,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => FormAction::Submit,
            KeyCode::Enter if self.focused + 1 >= self.fields.len() => FormAction::Submit,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.next();
                FormAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.previous();
                FormAction::None
            }
            KeyCode::Backspace => match self.fields.get_mut(self.focused) {
                Some(field) => {
                    if field.value.pop().is_some() {
                        FormAction::Edited
                    } else {
                        FormAction::None
                    }
                }
                None => FormAction::None,
            },
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                match self.fields.get_mut(self.focused) {
                    Some(field) => {
                        field.value.push(c);
                        FormAction::Edited
                    }
                    None => FormAction::None,
                }
            }
            _ => FormAction::None,
        }
    }
}
