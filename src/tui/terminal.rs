//! Terminal setup and teardown

use std::io::{self, Stderr};
use std::panic;

use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::AppResult;

use super::{app::App, event::EventHandler, ui};

pub type Backend = CrosstermBackend<Stderr>;

pub struct Tui {
    terminal: Terminal<Backend>,
    pub events: EventHandler,
}

impl Tui {
    pub fn new(terminal: Terminal<Backend>, events: EventHandler) -> Self {
        Self { terminal, events }
    }

    /// Enter raw mode and the alternate screen. A panic restores the
    /// terminal before the default hook prints.
    pub fn init(&mut self) -> AppResult<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stderr(), EnterAlternateScreen)?;

        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = Self::reset();
            default_hook(info);
        }));

        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn draw(&mut self, app: &mut App) -> AppResult<()> {
        self.terminal.draw(|frame| ui::render(app, frame))?;
        Ok(())
    }

    fn reset() -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(io::stderr(), LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn exit(&mut self) -> AppResult<()> {
        self.events.stop();
        Self::reset()?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}
