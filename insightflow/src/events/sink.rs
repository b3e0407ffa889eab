//! Notification sink trait and implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    /// Informational.
    #[default]
    Default,
    /// Reports a failure.
    Destructive,
}

/// A short user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Variant.
    #[serde(default)]
    pub variant: NotificationVariant,
}

impl Notification {
    /// Creates an informational notification.
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    /// Creates a failure notification.
    #[must_use]
    pub fn failure(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    /// Returns true for failure notifications.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

/// Receives notifications.
///
/// Implementations must not fail; delivery problems are logged and dropped.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers a notification.
    async fn notify(&self, notification: Notification);
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNotificationSink;

#[async_trait]
impl NotificationSink for NoOpNotificationSink {
    async fn notify(&self, _notification: Notification) {}
}

/// Writes notifications to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn notify(&self, notification: Notification) {
        if notification.is_failure() {
            warn!(
                title = %notification.title,
                "Notification: {}", notification.description
            );
        } else {
            info!(
                title = %notification.title,
                "Notification: {}", notification.description
            );
        }
    }
}

/// Collects notifications in memory, for tests and front-ends that poll.
#[derive(Debug, Default)]
pub struct CollectingNotificationSink {
    notifications: parking_lot::RwLock<Vec<Notification>>,
}

impl CollectingNotificationSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected notifications.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }

    /// Returns the most recent notification.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.notifications.read().last().cloned()
    }

    /// Returns the number of collected notifications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.read().len()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.read().is_empty()
    }

    /// Clears all collected notifications.
    pub fn clear(&self) {
        self.notifications.write().clear();
    }
}

#[async_trait]
impl NotificationSink for CollectingNotificationSink {
    async fn notify(&self, notification: Notification) {
        self.notifications.write().push(notification);
    }
}
