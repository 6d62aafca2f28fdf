//! Notification store access — the three statements of an invocation.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;

use techconf_common::error::DispatchError;
use techconf_common::types::{Attendee, NotificationContent};

/// Data access for the worker's unit of work. Every method runs on the
/// invocation's own connection (or transaction) handed in by the caller.
pub struct NotificationStore;

impl NotificationStore {
    /// Fetch the subject and body of a notification.
    pub async fn fetch_content(
        conn: &mut PgConnection,
        id: i32,
    ) -> Result<NotificationContent, DispatchError> {
        let content: Option<NotificationContent> =
            sqlx::query_as("SELECT subject, message FROM notification WHERE id = $1")
                .bind(id)
                .fetch_optional(conn)
                .await?;

        content.ok_or(DispatchError::NotificationNotFound { id })
    }

    /// Fetch every attendee in the store, in enumeration order.
    ///
    /// The recipient set is intentionally unscoped: the current product
    /// design notifies every registered attendee for every notification.
    pub async fn fetch_attendees(conn: &mut PgConnection) -> Result<Vec<Attendee>, DispatchError> {
        let attendees: Vec<Attendee> =
            sqlx::query_as("SELECT first_name, last_name, email FROM attendee")
                .fetch_all(conn)
                .await?;

        Ok(attendees)
    }

    /// Record a completed delivery on the notification row.
    ///
    /// Runs inside the invocation's transaction; the caller commits only
    /// after this succeeds.
    pub async fn mark_notified(
        conn: &mut PgConnection,
        id: i32,
        attendees_notified: usize,
        completed_date: DateTime<Utc>,
    ) -> Result<(), DispatchError> {
        let status = completion_status(attendees_notified);

        sqlx::query("UPDATE notification SET status = $1, completed_date = $2 WHERE id = $3")
            .bind(&status)
            .bind(completed_date)
            .bind(id)
            .execute(conn)
            .await?;

        tracing::info!(
            sql = %render_update(&status, completed_date, id),
            "Executed status update"
        );

        Ok(())
    }
}

/// The human-readable completion status written to the notification row.
pub fn completion_status(attendees_notified: usize) -> String {
    format!("Notified {attendees_notified} attendees")
}

/// Render the status update with its bound parameters as SQL literals, for
/// the diagnostic log line.
fn render_update(status: &str, completed_date: DateTime<Utc>, id: i32) -> String {
    format!(
        "UPDATE notification SET status = {}, completed_date = {} WHERE id = {}",
        quote_literal(status),
        quote_literal(&completed_date.to_rfc3339()),
        id
    )
}

/// Quote a string as a single-quoted SQL literal.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
