//! Application view-model

use std::time::{Duration, Instant};

use crate::{
    config::UiConfig,
    error::AppResult,
    models::user::User,
    services::Services,
};

use super::{
    screens::{home::HomeScreen, login::LoginScreen},
    toast::{Toast, ToastKind},
};

/// What a handled key asks the application to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Stay,
    /// Stay and show an informational toast
    Notice(String),
    /// Move focus from the content pane back to the menu
    Menu,
    EnterHome(User),
    Logout(Option<String>),
    AccountDeleted,
    Quit,
}

pub enum Screen {
    Login(LoginScreen),
    Home(Box<HomeScreen>),
}

pub struct App {
    pub services: Services,
    pub screen: Screen,
    pub toast: Option<Toast>,
    pub running: bool,
    toast_lifetime: Duration,
}

impl App {
    /// Start on the home screen of a restored session, or on the login screen
    pub async fn new(services: Services, config: &UiConfig, restored: Option<User>) -> AppResult<Self> {
        let screen = match restored {
            Some(user) => Screen::Home(Box::new(HomeScreen::load(&services, user).await?)),
            None => Screen::Login(LoginScreen::new()),
        };

        Ok(Self {
            services,
            screen,
            toast: None,
            running: true,
            toast_lifetime: Duration::from_secs(config.toast_seconds),
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.screen {
            Screen::Home(home) => Some(&home.session.user),
            Screen::Login(_) => None,
        }
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, ToastKind::Info, self.toast_lifetime));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, ToastKind::Error, self.toast_lifetime));
    }

    /// Drop the toast once it has expired
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub async fn apply(&mut self, transition: Transition) -> AppResult<()> {
        match transition {
            Transition::Stay | Transition::Menu => {}
            Transition::Notice(message) => self.notify(message),
            Transition::EnterHome(user) => {
                self.services.sessions.start(&user).await?;
                let greeting = format!("Welcome, {}", user.username);
                self.screen = Screen::Home(Box::new(HomeScreen::load(&self.services, user).await?));
                self.notify(greeting);
            }
            Transition::Logout(message) => {
                if let Some(user) = self.current_user().cloned() {
                    self.services.sessions.end(&user).await?;
                }
                self.screen = Screen::Login(LoginScreen::new());
                match message {
                    Some(message) => self.notify(message),
                    None => self.notify("Logged out"),
                }
            }
            Transition::AccountDeleted => {
                if let Some(user) = self.current_user().cloned() {
                    self.services.sessions.end(&user).await?;
                }
                self.screen = Screen::Login(LoginScreen::new());
                self.notify("Account deleted");
            }
            Transition::Quit => self.quit(),
        }
        Ok(())
    }
}
