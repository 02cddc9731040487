//! Single-slot ephemeral notifications and the navigation seam.
//!
//! The [`NotificationChannel`] holds at most one visible notification.
//! Showing a new one replaces the prior regardless of source; each
//! auto-dismisses after its own duration (3000 ms by default) unless
//! replaced sooner. Display is someone else's job; subscribers observe the
//! slot through a watch channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

/// Default auto-dismiss duration.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Info,
}

/// An ephemeral message for the single display slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub duration: Duration,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

struct Inner {
    slot: watch::Sender<Option<Notification>>,
    /// Bumped on every show; a dismiss timer only clears the slot if its
    /// generation is still current.
    generation: AtomicU64,
}

/// Fire-and-forget single-slot notification channel.
#[derive(Clone)]
pub struct NotificationChannel {
    inner: Arc<Inner>,
}

impl NotificationChannel {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                slot,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Show a notification, replacing whatever is currently visible.
    ///
    /// Spawns the auto-dismiss timer for this notification's duration.
    pub fn show(&self, notification: Notification) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let duration = notification.duration;
        tracing::debug!(kind = ?notification.kind, %generation, "showing notification");
        self.inner.slot.send_replace(Some(notification));

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            sleep(duration).await;
            // Only dismiss if nothing replaced us in the meantime.
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.slot.send_replace(None);
            }
        });
    }

    /// Convenience for error notifications with the default duration.
    pub fn error(&self, message: impl Into<String>) {
        self.show(Notification::error(message));
    }

    /// Convenience for info notifications with the default duration.
    pub fn info(&self, message: impl Into<String>) {
        self.show(Notification::info(message));
    }

    /// Subscribe to the visible slot.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.slot.subscribe()
    }

    /// The currently visible notification, if any.
    pub fn current(&self) -> Option<Notification> {
        self.inner.slot.borrow().clone()
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Navigation requested by the core (landing redirect, "book now",
/// "go home"). The environment owns the actual router.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, path: &str);
}

/// Navigator for headless use: logs the request and drops it.
pub struct NoNavigation;

impl Navigator for NoNavigation {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigation requested with no navigator attached");
    }
}
