//! Connector REST API client
//!
//! One client is constructed per inbound activity, bound to the regional
//! service host named in the activity's `serviceUrl` and to a freshly
//! fetched bearer token. Nothing here is shared or mutated across requests.

use reqwest::Client;
use tracing::{debug, error, info};

use crate::auth::BearerToken;
use crate::error::{Error, Result};
use crate::types::{Activity, ChannelAccount};

/// Bearer-authenticated client for one service host
#[derive(Clone)]
pub struct ConnectorClient {
    client: Client,
    base_url: String,
    token: BearerToken,
}

impl ConnectorClient {
    /// Create a client rooted at the given service URL.
    ///
    /// Different channels are served from different regional hosts, so the
    /// caller must pass the `serviceUrl` of the activity it is replying to.
    pub fn new(service_url: &str, token: BearerToken) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            base_url: service_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn add_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(self.token.secret())
    }

    /// Fetch the members of a conversation
    pub async fn get_conversation_members(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ChannelAccount>> {
        let url = format!("{}/v3/conversations/{}/members", self.base_url, conversation_id);

        debug!("Getting members of conversation: {}", conversation_id);

        let response = self
            .add_auth(self.client.get(&url))
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Get conversation members failed: {} - {}", status, error_text);
            return Err(Error::Api(format!("{}: {}", status, error_text)));
        }

        let members: Vec<ChannelAccount> = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        info!(
            "Got {} members for conversation {}",
            members.len(),
            conversation_id
        );
        Ok(members)
    }

    /// Send an activity into a conversation
    pub async fn send_to_conversation(
        &self,
        conversation_id: &str,
        activity: &Activity,
    ) -> Result<()> {
        let url = format!("{}/v3/conversations/{}/activities", self.base_url, conversation_id);

        debug!("Sending activity to conversation: {}", conversation_id);

        let response = self
            .add_auth(self.client.post(&url).json(activity))
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Send activity failed: {} - {}", status, error_text);
            return Err(Error::Api(format!("{}: {}", status, error_text)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_token() -> BearerToken {
        BearerToken::new("tok-abc", None)
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ConnectorClient::new("https://smba.trafficmanager.net/amer/", test_token());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url, "https://smba.trafficmanager.net/amer");
    }

    #[tokio::test]
    async fn test_get_conversation_members_sends_bearer_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/conversations/conv-42/members"))
            .and(header("authorization", "Bearer tok-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "u1", "name": "Alice"},
                {"id": "u2", "name": "Bob"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = ConnectorClient::new(&server.uri(), test_token()).unwrap();
        let members = client.get_conversation_members("conv-42").await.unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[0], ChannelAccount::new("u1", "Alice"));
        assert_eq!(members[1], ChannelAccount::new("u2", "Bob"));
    }

    #[tokio::test]
    async fn test_get_conversation_members_maps_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v3/conversations/conv-42/members"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let client = ConnectorClient::new(&server.uri(), test_token()).unwrap();
        match client.get_conversation_members("conv-42").await {
            Err(Error::Api(msg)) => assert!(msg.contains("403")),
            other => panic!("expected Error::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_to_conversation_posts_activity() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/conversations/conv-42/activities"))
            .and(header("authorization", "Bearer tok-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "1"})))
            .expect(1)
            .mount(&server)
            .await;

        let address = Address {
            conversation_id: "conv-42".to_string(),
            service_url: server.uri(),
            bot: ChannelAccount::new("bot1", "HelperBot"),
        };
        let activity = Activity::message(&address, "hello");

        let client = ConnectorClient::new(&server.uri(), test_token()).unwrap();
        client.send_to_conversation("conv-42", &activity).await.unwrap();
    }
}
