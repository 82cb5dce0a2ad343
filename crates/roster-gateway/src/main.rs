//! roster-gateway: conversation roster bot binary
//!
//! Loads configuration, starts the webhook server, and shuts down cleanly
//! on Ctrl+C.

use roster_bot::RosterBot;
use roster_core::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration (roster-bot.toml if present, else environment)
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting roster-gateway...");
    tracing::info!("App id: {}", config.app_id);

    let bot = RosterBot::new(config).map_err(|e| anyhow::anyhow!("Failed to create bot: {}", e))?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);

    let server = tokio::spawn(async move {
        if let Err(e) = bot.run(shutdown_rx).await {
            tracing::error!("Webhook server error: {}", e);
        }
    });

    tracing::info!("Press Ctrl+C to exit");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    let _ = shutdown_tx.send(());
    let _ = server.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
