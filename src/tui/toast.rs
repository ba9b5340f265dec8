//! Short-lived status messages

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind, lifetime: Duration) -> Self {
        Self::at(message, kind, Instant::now() + lifetime)
    }

    pub fn at(message: impl Into<String>, kind: ToastKind, expires_at: Instant) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
