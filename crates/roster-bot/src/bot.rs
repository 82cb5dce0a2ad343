//! Roster bot wiring
//!
//! Validates configuration, builds the token client and handler, and runs
//! the webhook server.

use std::sync::Arc;

use tracing::info;

use roster_core::{Config, Error, Result, TokenClient};

use crate::handler::ActivityHandler;
use crate::webhook::{create_webhook_router, start_webhook_server, WebhookState};

/// Conversation roster bot
pub struct RosterBot {
    config: Config,
    token_client: TokenClient,
}

impl RosterBot {
    /// Create a new roster bot
    pub fn new(config: Config) -> Result<Self> {
        if config.app_id.is_empty() {
            return Err(Error::Config("App id not configured".to_string()));
        }
        if config.app_password.is_empty() {
            return Err(Error::Config("App password not configured".to_string()));
        }

        let token_client = TokenClient::new(&config)?;

        Ok(Self {
            config,
            token_client,
        })
    }

    fn webhook_state(&self) -> WebhookState {
        WebhookState {
            handler: Arc::new(ActivityHandler::new(self.token_client.clone())),
        }
    }

    /// Start the webhook server (blocking)
    pub async fn start(&self) -> Result<()> {
        info!("Starting roster bot webhook on port {}", self.config.server.port);

        start_webhook_server(self.webhook_state(), self.config.server.port).await
    }

    /// Run the bot with a shutdown signal
    pub async fn run(&self, mut shutdown: tokio::sync::broadcast::Receiver<()>) -> Result<()> {
        info!("Starting roster bot webhook on port {}", self.config.server.port);

        let addr = format!("0.0.0.0:{}", self.config.server.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Webhook(e.to_string()))?;

        info!("Roster bot webhook listening on {}", addr);

        let app = create_webhook_router(self.webhook_state());

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                info!("Roster bot shutting down");
            })
            .await
            .map_err(|e| Error::Webhook(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_creation_fails_without_credentials() {
        let config = Config {
            app_id: String::new(),
            app_password: String::new(),
            server: Default::default(),
            auth: Default::default(),
        };

        assert!(matches!(RosterBot::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_bot_creation_with_credentials() {
        let config = Config {
            app_id: "app-123".to_string(),
            app_password: "secret".to_string(),
            server: Default::default(),
            auth: Default::default(),
        };

        assert!(RosterBot::new(config).is_ok());
    }
}
