//! Extraction diagnostics.
//!
//! Detection degrades locally instead of failing: an entity with unusable
//! geometry is skipped, a search that hits its cap stops early, an unknown
//! selection key in lenient mode is ignored. Each such event is recorded as a
//! [`Notification`] and returned with the build result, and mirrored to a
//! `tracing` event at the moment it happens.

use serde::Serialize;
use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// An input entity was ignored (missing or non-numeric geometry).
    Skipped,
    /// Non-fatal warning (e.g., ignored selection key, duplicate block).
    Warning,
    /// A bounded search stopped at its configured limit.
    Limit,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "Skipped"),
            Self::Warning => write!(f, "Warning"),
            Self::Limit => write!(f, "Limit"),
        }
    }
}

/// A single notification produced during a read or a detection pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// The category.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Collects notifications during one read or build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification and emit it as a tracing event.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        let message = message.into();
        match notification_type {
            NotificationType::Skipped => tracing::debug!(%message, "entity skipped"),
            NotificationType::Warning => tracing::warn!(%message),
            NotificationType::Limit => tracing::warn!(%message, "search limit reached"),
        }
        self.items.push(Notification::new(notification_type, message));
    }

    /// Append every notification of another collection.
    pub fn extend(&mut self, other: NotificationCollection) {
        self.items.extend(other.items);
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all notifications.
    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }
}

impl IntoIterator for NotificationCollection {
    type Item = Notification;
    type IntoIter = std::vec::IntoIter<Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
