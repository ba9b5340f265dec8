//! My account panel: password change and self-deletion

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    error::{AppError, AppResult},
    models::user::User,
    services::Services,
};

use crate::tui::{
    app::Transition,
    form::{Field, Form, FormAction},
};

use super::{Answer, Confirm};

pub const DELETE_PROMPT: &str = "This action is irreversible. Are you sure?";

pub struct AccountPanel {
    pub password: Form,
    pub confirm: Option<Confirm<()>>,
}

impl Default for AccountPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountPanel {
    pub fn new() -> Self {
        Self {
            password: Form::new(vec![Field::secret("New password")]),
            confirm: None,
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent, services: &Services, user: &User) -> AppResult<Transition> {
        if self.confirm.is_some() {
            return match Confirm::<()>::answer(key) {
                Answer::Yes => {
                    self.confirm = None;
                    services.auth.delete_account(user).await?;
                    Ok(Transition::AccountDeleted)
                }
                Answer::No => {
                    self.confirm = None;
                    Ok(Transition::Stay)
                }
                Answer::Pending => Ok(Transition::Stay),
            };
        }

        if key.code == KeyCode::Char('d') && key.modifiers.contains(KeyModifiers::CONTROL) {
            if user.is_root() {
                return Err(AppError::BusinessRule("The root account cannot be deleted".to_string()));
            }
            self.confirm = Some(Confirm::new(DELETE_PROMPT, ()));
            return Ok(Transition::Stay);
        }

        match self.password.handle_key(key) {
            FormAction::Submit => {
                let new_password = self.password.value(0).to_string();
                self.password.clear();
                services.auth.change_password(user, &new_password).await?;
                Ok(Transition::Notice("Password changed".to_string()))
            }
            FormAction::Cancel => {
                self.password.clear();
                Ok(Transition::Menu)
            }
            FormAction::Edited | FormAction::None => Ok(Transition::Stay),
        }
    }
}
