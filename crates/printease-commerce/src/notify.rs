//! User-facing notifications.
//!
//! Domain code emits [`Notification`]s through the [`Notifier`] port. The
//! storefront session uses a [`NotificationCenter`], which keeps the
//! currently visible notifications and reports new ones so their
//! auto-dismiss timers can be scheduled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Notification severity, which picks the widget color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier assigned by a [`NotificationCenter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// A transient message for the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for notifications.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in order. Handy for tests and batch callers.
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// Visible notifications plus the ids that still need a dismiss timer.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    next_id: u64,
    visible: Vec<(NotificationId, Notification)>,
    fresh: Vec<NotificationId>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently visible notifications, oldest first.
    pub fn visible(&self) -> &[(NotificationId, Notification)] {
        &self.visible
    }

    /// Ids posted since the last call.
    pub fn take_fresh(&mut self) -> Vec<NotificationId> {
        std::mem::take(&mut self.fresh)
    }

    /// Remove a notification. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.visible.len();
        self.visible.retain(|(visible_id, _)| *visible_id != id);
        self.visible.len() < before
    }

    /// Most recent notification, if any.
    pub fn latest(&self) -> Option<&Notification> {
        self.visible.last().map(|(_, n)| n)
    }
}

impl Notifier for NotificationCenter {
    fn notify(&mut self, notification: Notification) {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            id = id.0,
            severity = %notification.severity,
            text = %notification.message,
            "posting notification"
        );
        self.visible.push((id, notification));
        self.fresh.push(id);
    }
}
