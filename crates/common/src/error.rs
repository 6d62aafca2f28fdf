//! Error taxonomy for the notification dispatch pipeline.

use thiserror::Error;

/// Everything that can go wrong during one worker invocation.
///
/// The hosting boundary (the queue consumer loop) receives this as a typed
/// result, logs it, and acknowledges the message regardless — no variant is
/// ever allowed to propagate past the loop.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed queue message: {body:?} is not a notification id")]
    MalformedMessage { body: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("notification {id} not found")]
    NotificationNotFound { id: i32 },

    #[error("email delivery failed with status {status}: {detail}")]
    Delivery { status: u16, detail: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("email transport error: {0}")]
    Http(#[from] reqwest::Error),
}

impl DispatchError {
    /// Stable failure-kind label for the hosting boundary's structured logs,
    /// and for whatever requeue/dead-letter policy it grows later.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedMessage { .. } => "malformed_message",
            Self::Config(_) => "configuration",
            Self::NotificationNotFound { .. } => "notification_not_found",
            Self::Delivery { .. } => "delivery",
            Self::Database(_) => "database",
            Self::Http(_) => "http",
        }
    }
}
