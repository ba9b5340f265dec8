use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::screens::{
    account::AccountPanel,
    admin::{self, AdminHome},
    home::{Focus, HomeScreen, HomeView, ACCOUNT},
    normal::{self, NormalHome},
};
use crate::models::{
    rating::{MAX_SCORE, MIN_SCORE},
    user::User,
};

use super::widgets::{
    book_details, bordered, highlight, list_and_detail, render_details, render_dialog, render_form, render_list,
    user_details,
};

pub fn render(frame: &mut Frame, area: Rect, screen: &HomeScreen) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)])
        .split(rows[1]);

    let user = &screen.session.user;
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Library ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("| {} ({})", user.username, user.role)),
        ])),
        rows[0],
    );

    render_menu(frame, columns[0], screen);

    let content = columns[1];
    let focused = screen.focus == Focus::Content;
    if screen.selected == ACCOUNT {
        render_account(frame, content, &screen.account, user);
    } else if screen.selected > ACCOUNT {
        render_details(frame, content, "", vec![Line::raw(format!("Signed in as {}", user.username))]);
    } else {
        match &screen.view {
            HomeView::Normal(home) => render_normal(frame, content, home, screen.selected, focused),
            HomeView::Admin(home) => render_admin(frame, content, home, screen.selected, focused),
        }
    }

    frame.render_widget(
        Paragraph::new(Line::styled(hints(screen), Style::default().fg(Color::DarkGray))),
        rows[2],
    );
}

fn render_menu(frame: &mut Frame, area: Rect, screen: &HomeScreen) {
    let items: Vec<ListItem> = screen.menu().into_iter().map(ListItem::new).collect();
    let mut state = ListState::default().with_selected(Some(screen.selected));
    frame.render_stateful_widget(
        List::new(items)
            .block(bordered("Menu", screen.focus == Focus::Menu))
            .highlight_style(highlight()),
        area,
        &mut state,
    );
}

fn render_normal(frame: &mut Frame, area: Rect, home: &NormalHome, tab: usize, focused: bool) {
    let (list_area, detail_area) = list_and_detail(area);
    let title = normal::MENU[tab];

    match tab {
        normal::ALL_BOOKS => render_list(frame, list_area, title, &home.books, focused),
        normal::BORROWED => render_list(frame, list_area, title, &home.borrowed, focused),
        _ => render_list(frame, list_area, title, &home.favourites, focused),
    }

    let mut lines = home
        .selected_book(tab)
        .map(|book| book_details(book, false))
        .unwrap_or_default();
    if tab == normal::BORROWED {
        if let Some(borrowed) = home.borrowed.selected() {
            lines.insert(
                0,
                Line::raw(format!("Borrowed on {}", borrowed.borrowed_at.format("%Y-%m-%d"))),
            );
        }
    }
    render_details(frame, detail_area, "Details", lines);

    if let Some(dialog) = &home.rating {
        let stars: String = (MIN_SCORE..=MAX_SCORE)
            .map(|n| if n <= dialog.score { '*' } else { '.' })
            .collect();
        render_dialog(
            frame,
            area,
            "Rate",
            vec![
                Line::raw(dialog.title.clone()),
                Line::styled(stars, Style::default().fg(Color::Yellow)),
                Line::raw("<-/-> or 1-5, Enter to rate, Esc to close"),
            ],
        );
    }
}

fn render_admin(frame: &mut Frame, area: Rect, home: &AdminHome, tab: usize, focused: bool) {
    match tab {
        admin::ADD_BOOK => {
            render_form(frame, area, "Add a book", &home.add_book.form, home.add_book.feedback);
        }
        admin::BOOKS => match &home.edit_book {
            Some(editor) => render_form(frame, area, "Edit book", &editor.form, editor.feedback),
            None => {
                let (list_area, detail_area) = list_and_detail(area);
                render_list(frame, list_area, "Book management", &home.books, focused);
                let lines = home
                    .books
                    .selected()
                    .map(|book| book_details(book, true))
                    .unwrap_or_default();
                render_details(frame, detail_area, "Details", lines);
            }
        },
        _ => match &home.add_user {
            Some(editor) => render_form(frame, area, "Add user", &editor.form, editor.feedback.as_deref()),
            None => {
                let (list_area, detail_area) = list_and_detail(area);
                render_list(frame, list_area, "User management", &home.users, focused);
                let lines = home.users.selected().map(user_details).unwrap_or_default();
                render_details(frame, detail_area, "Details", lines);
            }
        },
    }

    if let Some(confirm) = &home.confirm {
        render_dialog(
            frame,
            area,
            "Confirm",
            vec![Line::raw(confirm.prompt.clone()), Line::raw("y / n")],
        );
    }
}

fn render_account(frame: &mut Frame, area: Rect, panel: &AccountPanel, user: &User) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    render_details(frame, rows[0], "My account", user_details(user));
    render_form(frame, rows[1], "Change password", &panel.password, None);

    if let Some(confirm) = &panel.confirm {
        render_dialog(
            frame,
            area,
            "Delete account",
            vec![Line::raw(confirm.prompt.clone()), Line::raw("y / n")],
        );
    }
}

fn hints(screen: &HomeScreen) -> String {
    if screen.focus == Focus::Menu {
        return " Up/Down select  Enter open  Ctrl-Q quit".to_string();
    }
    if screen.selected == ACCOUNT {
        let delete = if screen.session.user.is_root() { "" } else { "  Ctrl-D delete account" };
        return format!(" Enter change password{}  Esc menu", delete);
    }
    match (&screen.view, screen.selected) {
        (HomeView::Normal(_), _) => " / search  b borrow  r return  l like  u unlike  s rate  Esc menu".to_string(),
        (HomeView::Admin(_), admin::ADD_BOOK) => " Tab next field  Enter/Ctrl-S save  Esc menu".to_string(),
        (HomeView::Admin(_), admin::BOOKS) => " / search  e edit  x remove  Esc menu".to_string(),
        (HomeView::Admin(_), _) => " / search  a add  x remove  g grant admin  v revoke admin  Esc menu".to_string(),
    }
}
