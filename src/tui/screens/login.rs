//! Login and signup screen

use crossterm::event::{KeyCode, KeyEvent};

use crate::{error::AppResult, models::user::NewUser, services::Services};

use crate::tui::{
    app::Transition,
    form::{Field, Form, FormAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    Login,
    Signup,
}

pub struct LoginScreen {
    pub mode: LoginMode,
    pub login: Form,
    pub signup: Form,
    /// Live signup validation message
    pub feedback: Option<String>,
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            mode: LoginMode::Login,
            login: Form::new(vec![Field::text("Username"), Field::secret("Password")]),
            signup: Form::new(vec![
                Field::text("Email"),
                Field::text("Username"),
                Field::secret("Password"),
            ]),
            feedback: None,
        }
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            LoginMode::Login => LoginMode::Signup,
            LoginMode::Signup => LoginMode::Login,
        };
    }

    fn new_user(&self) -> NewUser {
        NewUser::new(self.signup.value(0).trim(), self.signup.value(1).trim(), self.signup.value(2))
    }

    pub async fn handle_key(&mut self, key: KeyEvent, services: &Services) -> AppResult<Transition> {
        if matches!(key.code, KeyCode::Left | KeyCode::Right) {
            self.toggle();
            return Ok(Transition::Stay);
        }

        match self.mode {
            LoginMode::Login => match self.login.handle_key(key) {
                FormAction::Submit => {
                    let username = self.login.value(0).trim().to_string();
                    let password = self.login.value(1).to_string();
                    self.login.set_value(1, "");
                    let user = services.auth.login(&username, &password).await?;
                    Ok(Transition::EnterHome(user))
                }
                FormAction::Cancel => Ok(Transition::Quit),
                FormAction::Edited | FormAction::None => Ok(Transition::Stay),
            },
            LoginMode::Signup => match self.signup.handle_key(key) {
                FormAction::Edited => {
                    self.feedback = services.auth.validate_signup(&self.new_user(), false).await?;
                    Ok(Transition::Stay)
                }
                FormAction::Submit => {
                    let user = services.auth.signup(self.new_user()).await?;
                    Ok(Transition::EnterHome(user))
                }
                FormAction::Cancel => Ok(Transition::Quit),
                FormAction::None => Ok(Transition::Stay),
            },
        }
    }
}
