//! Database connection helper.

use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};

/// Open a single connection scoped to one worker invocation.
///
/// There is no process-wide pool: each queue message gets its own
/// connection, released when the invocation ends (on every exit path,
/// success or failure).
pub async fn connect(options: &PgConnectOptions) -> Result<PgConnection, sqlx::Error> {
    let conn = PgConnection::connect_with(options).await?;
    tracing::debug!("Database connection opened");
    Ok(conn)
}
