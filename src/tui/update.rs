//! Key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::AppResult;

use super::app::{App, Screen};

/// Route a key to the current screen. Recoverable errors become toasts;
/// storage and I/O failures end the loop.
pub async fn update(app: &mut App, key: KeyEvent) -> AppResult<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        app.quit();
        return Ok(());
    }

    let result = match &mut app.screen {
        Screen::Login(screen) => screen.handle_key(key, &app.services).await,
        Screen::Home(screen) => screen.handle_key(key, &app.services).await,
    };

    match result {
        Ok(transition) => app.apply(transition).await,
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::debug!("Rejected action: {}", e);
            app.warn(e.user_message());
            Ok(())
        }
    }
}
