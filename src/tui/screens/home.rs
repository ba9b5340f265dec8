//! Home screen shell: side menu plus the role specific content

use crossterm::event::{KeyCode, KeyEvent};

use crate::{
    error::AppResult,
    models::user::User,
    services::Services,
    session::{ActiveSession, Home},
};

use crate::tui::app::Transition;

use super::{account::AccountPanel, admin::AdminHome, normal::NormalHome};

/// Index of "My account" in both menus
pub const ACCOUNT: usize = 3;
pub const LOGOUT: &str = "Logout";
pub const QUIT: &str = "Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Menu,
    Content,
}

pub enum HomeView {
    Normal(NormalHome),
    Admin(AdminHome),
}

pub struct HomeScreen {
    pub session: ActiveSession,
    pub view: HomeView,
    pub account: AccountPanel,
    pub selected: usize,
    pub focus: Focus,
}

impl HomeScreen {
    pub async fn load(services: &Services, user: User) -> AppResult<Self> {
        let session = ActiveSession::new(user);
        let view = match session.home() {
            Home::Admin => HomeView::Admin(AdminHome::load(services, &session.user).await?),
            Home::Normal => HomeView::Normal(NormalHome::load(services, &session.user).await?),
        };

        Ok(Self {
            session,
            view,
            account: AccountPanel::new(),
            selected: 0,
            focus: Focus::Menu,
        })
    }

    pub fn menu(&self) -> Vec<&'static str> {
        let tabs = match self.view {
            HomeView::Normal(_) => super::normal::MENU,
            HomeView::Admin(_) => super::admin::MENU,
        };
        tabs.into_iter().chain([LOGOUT, QUIT]).collect()
    }

    async fn reload(&mut self, services: &Services) -> AppResult<()> {
        let user = &self.session.user;
        match &mut self.view {
            HomeView::Normal(home) => home.reload(services, user).await,
            HomeView::Admin(home) => home.reload(services, user).await,
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent, services: &Services) -> AppResult<Transition> {
        match self.focus {
            Focus::Menu => self.menu_key(key, services).await,
            Focus::Content => {
                let user = &self.session.user;
                let transition = if self.selected == ACCOUNT {
                    self.account.handle_key(key, services, user).await?
                } else {
                    match &mut self.view {
                        HomeView::Normal(home) => home.handle_key(self.selected, key, services, user).await?,
                        HomeView::Admin(home) => home.handle_key(self.selected, key, services, user).await?,
                    }
                };

                if transition == Transition::Menu {
                    self.focus = Focus::Menu;
                    return Ok(Transition::Stay);
                }
                Ok(transition)
            }
        }
    }

    async fn menu_key(&mut self, key: KeyEvent, services: &Services) -> AppResult<Transition> {
        let menu = self.menu();
        match key.code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(menu.len() - 1),
            KeyCode::Enter | KeyCode::Right | KeyCode::Tab => match menu.get(self.selected).copied() {
                Some(LOGOUT) => return Ok(Transition::Logout(None)),
                Some(QUIT) => return Ok(Transition::Quit),
                Some(_) => {
                    self.reload(services).await?;
                    self.focus = Focus::Content;
                }
                None => {}
            },
            _ => {}
        }
        Ok(Transition::Stay)
    }
}
