//! Queue connection helper.

use redis::Client;
use redis::aio::ConnectionManager;

/// Create a Redis connection manager for the queue consumer loop.
pub async fn connect(queue_url: &str) -> anyhow::Result<ConnectionManager> {
    let client = Client::open(queue_url)?;
    let manager = ConnectionManager::new(client).await?;

    tracing::info!("Connected to queue broker");
    Ok(manager)
}
