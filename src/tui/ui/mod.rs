//! Rendering. Everything drawn is derived from the `App` state.

mod home;
mod login;
pub mod widgets;

use ratatui::Frame;

use super::app::{App, Screen};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.size();
    match &app.screen {
        Screen::Login(screen) => login::render(frame, area, screen),
        Screen::Home(screen) => home::render(frame, area, screen),
    }
    if let Some(toast) = &app.toast {
        widgets::render_toast(frame, area, toast);
    }
}
