//! Transient notifications shown in the status bar

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// How many notifications are kept for the history
const MAX_NOTIFICATIONS: usize = 20;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
            created_at: Local::now(),
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title, description)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title, description)
    }

    /// One-line rendering for the status bar
    pub fn summary(&self) -> String {
        let time = self.created_at.format("%H:%M:%S");
        if self.description.is_empty() {
            format!("[{time}] {}", self.title)
        } else {
            format!("[{time}] {}: {}", self.title, self.description)
        }
    }
}

/// Most recent notifications, newest last
#[derive(Debug, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        if self.items.len() == MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop the notification currently shown
    pub fn dismiss_latest(&mut self) {
        self.items.pop_back();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}
