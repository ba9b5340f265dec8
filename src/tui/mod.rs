//! Full-screen terminal interface

pub mod app;
pub mod event;
pub mod form;
pub mod list;
pub mod screens;
pub mod terminal;
pub mod toast;
pub mod ui;
pub mod update;

use std::io;
use std::time::Instant;

use ratatui::{backend::CrosstermBackend, Terminal};

use crate::{config::UiConfig, error::AppResult, models::user::User, services::Services};

use self::{
    app::App,
    event::{Event, EventHandler},
    terminal::Tui,
    update::update,
};

/// Run the interface until the user quits. The terminal is restored
/// before any error is returned.
pub async fn run(services: Services, config: &UiConfig, restored: Option<User>) -> AppResult<()> {
    let mut app = App::new(services, config, restored).await?;

    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new(config.tick_rate_ms);
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    let result = event_loop(&mut app, &mut tui).await;
    finish(result, tui.exit())
}

/// The error that ended the loop wins over a failure to restore the terminal
fn finish(result: AppResult<()>, exit: AppResult<()>) -> AppResult<()> {
    match (result, exit) {
        (Err(e), exit) => {
            if let Err(exit_error) = exit {
                tracing::error!("Failed to restore terminal: {}", exit_error);
            }
            Err(e)
        }
        (Ok(()), exit) => exit,
    }
}

async fn event_loop(app: &mut App, tui: &mut Tui) -> AppResult<()> {
    while app.running {
        tui.draw(app)?;
        match tui.events.next().await? {
            Event::Tick => app.tick(Instant::now()),
            Event::Key(key) => update(app, key).await?,
            Event::Resize(_, _) => {}
        }
    }
    Ok(())
}
