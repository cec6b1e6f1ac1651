// ─── Notifications ───
// Transient, non-blocking user messages (toasts). Host failures always end
// up here; the stores never let them escape as unhandled faults.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use uuid::Uuid;

use super::error::LauncherError;
use super::observe::{Subscribers, Subscription};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded history of recent notifications plus live subscribers.
#[derive(Clone)]
pub struct Notifier {
    history: Arc<Mutex<VecDeque<Notification>>>,
    capacity: usize,
    subscribers: Subscribers<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
            subscribers: Subscribers::new(),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message.into());
    }

    /// Turn a failed operation into a user-facing error toast.
    pub fn failure(&self, headline: &str, err: &LauncherError) {
        tracing::debug!("notifying failure: {headline}: {err}");
        self.push(NotificationLevel::Error, headline.to_string());
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Most recent notifications, oldest first.
    pub fn recent(&self) -> Vec<Notification> {
        self.history.lock().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<Notification> {
        self.history.lock().back().cloned()
    }

    pub fn clear(&self) {
        self.history.lock().clear();
    }

    fn push(&self, level: NotificationLevel, message: String) {
        let notification = Notification {
            id: Uuid::new_v4(),
            level,
            message,
            created_at: Utc::now(),
        };

        {
            let mut history = self.history.lock();
            while history.len() >= self.capacity {
                history.pop_front();
            }
            history.push_back(notification.clone());
        }

        self.subscribers.emit(&notification);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(32)
    }
}
