use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Tabs},
    Frame,
};

use crate::tui::screens::login::{LoginMode, LoginScreen};

use super::widgets::{bordered, centered, highlight, render_form};

pub fn render(frame: &mut Frame, area: Rect, screen: &LoginScreen) {
    let outer = centered(60, 14, area);
    let block = bordered("Library", true);
    let inner = block.inner(outer);
    frame.render_widget(block, outer);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5), Constraint::Length(1)])
        .split(inner);

    let selected = match screen.mode {
        LoginMode::Login => 0,
        LoginMode::Signup => 1,
    };
    frame.render_widget(
        Tabs::new(vec!["Login", "Signup"]).select(selected).highlight_style(highlight()),
        chunks[0],
    );

    match screen.mode {
        LoginMode::Login => render_form(frame, chunks[1], "Login", &screen.login, None),
        LoginMode::Signup => render_form(frame, chunks[1], "Signup", &screen.signup, screen.feedback.as_deref()),
    }

    frame.render_widget(
        Paragraph::new(Line::styled(
            "<-/-> switch  Tab next field  Enter submit  Esc quit",
            Style::default().fg(Color::DarkGray),
        )),
        chunks[2],
    );
}
