//! Activity handler
//!
//! One inbound activity runs one sequential pipeline: extract the address,
//! fetch a token, build a connector client for the activity's service host,
//! then fetch members or send announcements. Nothing is shared between
//! activities; each gets its own freshly configured client.

use tracing::{debug, error};

use roster_core::{Activity, Address, ConnectorClient, Result, TokenClient};

use crate::notify;

/// Handler for inbound connector activities
pub struct ActivityHandler {
    token_client: TokenClient,
}

impl ActivityHandler {
    pub fn new(token_client: TokenClient) -> Self {
        Self { token_client }
    }

    /// Process an inbound activity
    pub async fn process_activity(&self, activity: &Activity) -> Result<()> {
        match activity.activity_type.as_str() {
            "message" => self.on_message(activity).await,
            "conversationUpdate" => self.on_conversation_update(activity).await,
            other => {
                debug!("Ignoring activity of type: {}", other);
                Ok(())
            }
        }
    }

    /// Build a connector client for the activity's service host.
    ///
    /// The token is fetched per activity and never cached.
    async fn connector_for(&self, address: &Address) -> Result<ConnectorClient> {
        let token = self.token_client.fetch().await?;
        ConnectorClient::new(&address.service_url, token)
    }

    /// A group message: look up the conversation members and post the roster
    async fn on_message(&self, activity: &Activity) -> Result<()> {
        let address = activity.address()?;
        let client = self.connector_for(&address).await?;

        let members = match client.get_conversation_members(&address.conversation_id).await {
            Ok(members) => members,
            Err(e) => {
                // No retry and no user-visible error: log and drop.
                error!("Error retrieving conversation members: {}", e);
                return Ok(());
            }
        };

        if let Some(text) = notify::roster_text(&members) {
            client
                .send_to_conversation(&address.conversation_id, &Activity::message(&address, text))
                .await?;
        }

        Ok(())
    }

    /// Members joined or left: post one announcement per list
    async fn on_conversation_update(&self, activity: &Activity) -> Result<()> {
        if activity.members_added.is_empty() && activity.members_removed.is_empty() {
            return Ok(());
        }

        let address = activity.address()?;
        let client = self.connector_for(&address).await?;

        if let Some(text) = notify::welcome_text(&activity.members_added, &address.bot) {
            client
                .send_to_conversation(&address.conversation_id, &Activity::message(&address, text))
                .await?;
        }

        if let Some(text) = notify::farewell_text(&activity.members_removed, &address.bot) {
            client
                .send_to_conversation(&address.conversation_id, &Activity::message(&address, text))
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{Config, Error};

    fn test_handler() -> ActivityHandler {
        let config = Config {
            app_id: "app-123".to_string(),
            app_password: "secret".to_string(),
            server: Default::default(),
            auth: Default::default(),
        };
        ActivityHandler::new(TokenClient::new(&config).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_activity_types_are_ignored() {
        let activity: Activity = serde_json::from_str(r#"{"type": "typing"}"#).unwrap();
        assert!(test_handler().process_activity(&activity).await.is_ok());
    }

    #[tokio::test]
    async fn test_conversation_update_without_member_changes_is_ignored() {
        // No address on the wire either: must not error because the member
        // lists are empty and the pipeline never starts.
        let activity: Activity =
            serde_json::from_str(r#"{"type": "conversationUpdate"}"#).unwrap();
        assert!(test_handler().process_activity(&activity).await.is_ok());
    }

    #[tokio::test]
    async fn test_message_without_conversation_is_malformed() {
        let activity: Activity = serde_json::from_str(
            r#"{"type": "message", "serviceUrl": "https://example.com", "text": "hi"}"#,
        )
        .unwrap();

        match test_handler().process_activity(&activity).await {
            Err(Error::Activity(_)) => {}
            other => panic!("expected Error::Activity, got {:?}", other),
        }
    }
}
