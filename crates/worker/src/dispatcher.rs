//! Per-invocation dispatch — the worker's unit of work.
//!
//! One queue message is one invocation: parse the id, validate the
//! configuration the invocation needs, open a connection scoped to the
//! invocation, and run reads → batch send → status write inside a single
//! transaction.

use chrono::Utc;
use sqlx::{Connection, PgConnection};

use techconf_common::config::Settings;
use techconf_common::db;
use techconf_common::error::DispatchError;
use techconf_common::types::DispatchOutcome;
use techconf_mailer::{EmailMessage, MailjetClient};

use crate::store::NotificationStore;

/// Parse the queue message body into a notification id.
///
/// The body is the decimal text of the id, nothing more; surrounding
/// whitespace is tolerated.
pub fn parse_message(body: &str) -> Result<i32, DispatchError> {
    body.trim().parse().map_err(|_| DispatchError::MalformedMessage {
        body: body.to_string(),
    })
}

/// Run one full invocation for a raw queue message body.
///
/// Both configuration subsets are validated before anything touches the
/// network, so a missing variable can never leave a half-done invocation
/// behind. The database connection lives only for this invocation.
pub async fn process_message(
    settings: &Settings,
    body: &str,
) -> Result<DispatchOutcome, DispatchError> {
    let started_at = Utc::now();
    let id = parse_message(body)?;
    tracing::info!(notification_id = id, %started_at, "Queue message received");

    let database = settings.database()?;
    let mailjet = settings.mailjet()?;

    let mut conn = db::connect(&database.connect_options()?).await?;
    let mailer = MailjetClient::new(&mailjet);

    dispatch(&mut conn, &mailer, id).await
}

/// Execute the unit of work for one notification id.
///
/// The reads, the batch send, and the status write share one transaction:
/// the row is marked complete only if the batch was accepted, and nothing
/// is committed on any failure path (drop rolls back).
pub async fn dispatch(
    conn: &mut PgConnection,
    mailer: &MailjetClient,
    id: i32,
) -> Result<DispatchOutcome, DispatchError> {
    let mut tx = conn.begin().await?;

    let content = NotificationStore::fetch_content(&mut tx, id).await?;
    let attendees = NotificationStore::fetch_attendees(&mut tx).await?;

    let mut batch = Vec::with_capacity(attendees.len());
    for attendee in &attendees {
        let email = EmailMessage::personalized(attendee, &content.subject, &content.message);
        tracing::info!(
            recipient = %attendee.email,
            subject = %email.subject,
            body = %email.html_part,
            "Composed email"
        );
        batch.push(email);
    }

    mailer.send_batch(&batch).await?;

    NotificationStore::mark_notified(&mut tx, id, attendees.len(), Utc::now()).await?;
    tx.commit().await?;

    tracing::info!(
        notification_id = id,
        attendees = attendees.len(),
        "Notification dispatched"
    );

    Ok(DispatchOutcome {
        notification_id: id,
        attendees_notified: attendees.len(),
    })
}
