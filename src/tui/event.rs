//! Terminal events delivered from a background task

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Tick,
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Reads the terminal and emits a tick every `tick_rate_ms`
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms.max(10));
        let (sender, receiver) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut ticker = tokio::time::interval(tick_rate);
            loop {
                let tick = ticker.tick();
                let next = reader.next().fuse();
                tokio::select! {
                    _ = sender.closed() => break,
                    _ = tick => {
                        if sender.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    Some(Ok(event)) = next => {
                        let event = match event {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
                            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
                            _ => continue,
                        };
                        if sender.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self { receiver, task }
    }

    pub async fn next(&mut self) -> AppResult<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| AppError::Internal("Terminal event stream closed".to_string()))
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}
