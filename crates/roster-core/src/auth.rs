//! Token acquisition for the connector service
//!
//! Every outbound REST call is authenticated with a short-lived bearer token
//! obtained through an OAuth2 client-credentials grant. Tokens are fetched
//! per inbound activity and never cached.

use serde::Deserialize;
use tracing::{debug, error};

use crate::config::{AuthConfig, Config};
use crate::error::{Error, Result};

/// A bearer credential scoped to one request
#[derive(Clone)]
pub struct BearerToken {
    secret: String,
    /// Lifetime in seconds as reported by the token service
    pub expires_in: Option<u64>,
}

impl BearerToken {
    pub fn new(secret: impl Into<String>, expires_in: Option<u64>) -> Self {
        Self {
            secret: secret.into(),
            expires_in,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerToken")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Client for the platform token service
#[derive(Clone)]
pub struct TokenClient {
    client: reqwest::Client,
    app_id: String,
    app_password: String,
    auth: AuthConfig,
}

impl TokenClient {
    /// Create a new token client from the bot configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            app_id: config.app_id.clone(),
            app_password: config.app_password.clone(),
            auth: config.auth.clone(),
        })
    }

    /// Fetch a fresh bearer token
    pub async fn fetch(&self) -> Result<BearerToken> {
        debug!("Requesting bearer token from {}", self.auth.token_endpoint);

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.app_id.as_str()),
            ("client_secret", self.app_password.as_str()),
            ("scope", self.auth.scope.as_str()),
        ];

        let response = self
            .client
            .post(&self.auth.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Token request failed: {} - {}", status, error_text);
            return Err(Error::Token(format!("{}: {}", status, error_text)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(BearerToken::new(token.access_token, token.expires_in))
    }
}
