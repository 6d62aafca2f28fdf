//! Shared domain types for the notification pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persistent notification authored by an administrator.
///
/// `status` and `completed_date` stay NULL until the worker records a
/// completed delivery attempt.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i32,
    pub subject: String,
    pub message: String,
    pub status: Option<String>,
    pub completed_date: Option<DateTime<Utc>>,
}

/// The subset of a notification the worker reads: subject and HTML body.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotificationContent {
    pub subject: String,
    pub message: String,
}

/// A conference attendee, one row per recipient.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attendee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Attendee {
    /// "first last", as rendered into greetings and recipient names.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Successful invocation result surfaced to the hosting boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub notification_id: i32,
    pub attendees_notified: usize,
}
