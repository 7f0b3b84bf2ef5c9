//! User-facing notification queue.
//!
//! The gateway and stores push ephemeral, toast-style notifications here;
//! the embedding UI drains them each render. Nothing in the queue is fatal -
//! every notified failure leaves the stores in a known-good state and the
//! user free to retry.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Maximum number of undrained notifications retained; oldest are dropped.
const MAX_PENDING: usize = 32;

/// Severity of a [`Notification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A single toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Cheaply clonable handle to the process-wide notification queue.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl Notifier {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an informational message.
    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message);
    }

    /// Push a success message.
    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    /// Push an error message.
    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    fn push(&self, level: NotificationLevel, message: impl Into<String>) {
        let mut queue = self.lock();
        if queue.len() == MAX_PENDING {
            queue.pop_front();
        }
        queue.push_back(Notification {
            level,
            message: message.into(),
        });
    }

    /// Take all pending notifications, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        self.lock().drain(..).collect()
    }

    /// Number of pending notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        // A panic while holding the lock leaves the queue intact; recover it.
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
