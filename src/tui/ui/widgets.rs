//! Shared drawing helpers

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::models::{book::Book, user::User};
use crate::tui::{
    form::Form,
    list::{Searchable, SearchableList},
    toast::{Toast, ToastKind},
};

pub fn highlight() -> Style {
    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn label(text: &str) -> Span<'static> {
    Span::styled(format!("{}: ", text), Style::default().add_modifier(Modifier::BOLD))
}

pub fn bordered(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title.to_string())
}

/// Rect of `width` x `height` centered in `area`, shrunk to fit
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Split `area` into a list pane and a detail pane
pub fn list_and_detail(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn render_form(frame: &mut Frame, area: Rect, title: &str, form: &Form, feedback: Option<&str>) {
    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let value = if index == form.focused {
                Span::styled(format!("{}_", field.display()), Style::default().fg(Color::Yellow))
            } else {
                Span::raw(field.display())
            };
            Line::from(vec![label(field.label), value])
        })
        .collect();

    if let Some(message) = feedback {
        lines.push(Line::raw(""));
        lines.push(Line::styled(message.to_string(), Style::default().fg(Color::Red)));
    }

    let paragraph = Paragraph::new(lines)
        .block(bordered(title, true))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

pub fn render_list<T: Searchable>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    list: &SearchableList<T>,
    focused: bool,
) {
    let block = bordered(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let search_style = if list.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if list.searching { "_" } else { "" };
    frame.render_widget(
        Paragraph::new(Line::styled(format!("Search: {}{}", list.query, cursor), search_style)),
        chunks[0],
    );

    let items: Vec<ListItem> = list
        .visible()
        .into_iter()
        .map(|item| ListItem::new(item.label()))
        .collect();
    let mut state = ListState::default().with_selected(list.selected_index());
    frame.render_stateful_widget(List::new(items).highlight_style(highlight()), chunks[1], &mut state);
}

/// Detail panel lines; administrators see the stock count instead of availability
pub fn book_details(book: &Book, admin: bool) -> Vec<Line<'static>> {
    let optional = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        Line::from(vec![label("Title"), Span::raw(book.title.clone())]),
        Line::from(vec![label("Author"), Span::raw(book.author.clone())]),
        Line::from(vec![label("Publisher"), Span::raw(optional(book.publisher.clone()))]),
        Line::from(vec![label("Year"), Span::raw(optional(book.pub_year.map(|y| y.to_string())))]),
        Line::from(vec![label("Edition"), Span::raw(optional(book.edition.map(|e| e.to_string())))]),
        Line::from(vec![label("Rating"), Span::raw(book.rating_label())]),
    ];

    if admin {
        lines.push(Line::from(vec![label("Quantity"), Span::raw(book.quantity.to_string())]));
    } else {
        let color = if book.is_available() { Color::Green } else { Color::Red };
        lines.push(Line::styled(book.availability_label(), Style::default().fg(color)));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw(book.description.clone().unwrap_or_default()));
    lines
}

pub fn user_details(user: &User) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![label("Username"), Span::raw(user.username.clone())]),
        Line::from(vec![label("Email"), Span::raw(user.email.clone())]),
        Line::from(vec![label("Category"), Span::raw(user.role.to_string())]),
    ]
}

pub fn render_details(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let paragraph = Paragraph::new(lines)
        .block(bordered(title, false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Modal box drawn over whatever is below
pub fn render_dialog(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let width = lines
        .iter()
        .map(|line| line.width() as u16)
        .max()
        .unwrap_or(0)
        .max(title.len() as u16)
        + 4;
    let rect = centered(width.max(30), lines.len() as u16 + 2, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(bordered(title, true).style(Style::default().bg(Color::Black))),
        rect,
    );
}

pub fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let color = match toast.kind {
        ToastKind::Info => Color::Green,
        ToastKind::Error => Color::Red,
    };
    let width = (toast.message.chars().count() as u16 + 4).min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(4),
        width,
        height: 3.min(area.height),
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Line::styled(toast.message.clone(), Style::default().fg(color)))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color))),
        rect,
    );
}
