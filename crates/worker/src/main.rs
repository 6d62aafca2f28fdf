//! TechConf notification worker binary entrypoint.

use tracing_subscriber::EnvFilter;

use techconf_common::config::Settings;
use techconf_common::queue;
use techconf_worker::consumer::QueueConsumer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "techconf_worker=info,techconf_mailer=debug".into()),
        )
        .init();

    tracing::info!("TechConf notification worker starting...");

    // Load configuration; only the queue settings are required to boot — the
    // database and Mailjet subsets are validated per invocation.
    let settings = Settings::from_env();
    let queue_settings = settings.queue()?;

    // Connect to the queue broker
    let redis = queue::connect(&queue_settings.url).await?;

    let mut consumer = QueueConsumer::new(redis, queue_settings.name.clone(), settings);

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = consumer.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Queue consumer exited with error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("TechConf notification worker stopped.");
    Ok(())
}
