//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. roster-bot.toml config file
//! 3. Default values
//!
//! Inside the config file, `${VAR_NAME}` is expanded from the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

/// Webhook server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the webhook listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Token service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth2 token endpoint for the client-credentials grant
    #[serde(default = "default_token_endpoint")]
    pub token_endpoint: String,

    /// Scope requested with the grant
    #[serde(default = "default_token_scope")]
    pub scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_endpoint: default_token_endpoint(),
            scope: default_token_scope(),
        }
    }
}

fn default_port() -> u16 {
    3978
}

fn default_token_endpoint() -> String {
    "https://login.microsoftonline.com/botframework.com/oauth2/v2.0/token".to_string()
}

fn default_token_scope() -> String {
    "https://api.botframework.com/.default".to_string()
}

/// Main configuration for the roster bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application (client) id registered with the platform
    pub app_id: String,

    /// Application password (client secret)
    #[serde(skip_serializing)]
    pub app_password: String,

    /// Webhook server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Token service configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Expand `${VAR_NAME}` references from the environment.
    ///
    /// Unknown variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(chars.next().unwrap());
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file.
    ///
    /// `${VAR_NAME}` in the file is replaced with the environment value;
    /// environment variables then override whatever the file set.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let toml_config: TomlConfig = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        let mut cfg = Self::from_toml_config(toml_config);
        cfg.apply_env_overrides();

        Ok(cfg)
    }

    /// Load configuration from the default locations.
    ///
    /// Tries `./roster-bot.toml` first, then falls back to environment
    /// variables only.
    pub fn load() -> crate::Result<Self> {
        if Path::new("roster-bot.toml").exists() {
            return Self::from_toml_file("roster-bot.toml");
        }

        Self::from_env()
    }

    fn from_toml_config(toml: TomlConfig) -> Self {
        let bot = toml.bot.unwrap_or_default();
        let server = toml.server.unwrap_or_default();
        let auth = toml.auth.unwrap_or_default();

        Config {
            app_id: bot.app_id.unwrap_or_default(),
            app_password: bot.app_password.unwrap_or_default(),
            server: ServerConfig {
                port: server.port.unwrap_or_else(default_port),
            },
            auth: AuthConfig {
                token_endpoint: auth.token_endpoint.unwrap_or_else(default_token_endpoint),
                scope: auth.scope.unwrap_or_else(default_token_scope),
            },
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(app_id) = std::env::var("MICROSOFT_APP_ID") {
            if !app_id.is_empty() {
                self.app_id = app_id;
            }
        }
        if let Ok(password) = std::env::var("MICROSOFT_APP_PASSWORD") {
            if !password.is_empty() {
                self.app_password = password;
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(endpoint) = std::env::var("BOT_TOKEN_ENDPOINT") {
            if !endpoint.is_empty() {
                self.auth.token_endpoint = endpoint;
            }
        }
        if let Ok(scope) = std::env::var("BOT_TOKEN_SCOPE") {
            if !scope.is_empty() {
                self.auth.scope = scope;
            }
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> crate::Result<Self> {
        let app_id = std::env::var("MICROSOFT_APP_ID")
            .map_err(|_| Error::Config("MICROSOFT_APP_ID not set".to_string()))?;
        let app_password = std::env::var("MICROSOFT_APP_PASSWORD")
            .map_err(|_| Error::Config("MICROSOFT_APP_PASSWORD not set".to_string()))?;

        Ok(Config {
            app_id,
            app_password,
            server: ServerConfig {
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or_else(default_port),
            },
            auth: AuthConfig {
                token_endpoint: std::env::var("BOT_TOKEN_ENDPOINT")
                    .unwrap_or_else(|_| default_token_endpoint()),
                scope: std::env::var("BOT_TOKEN_SCOPE").unwrap_or_else(|_| default_token_scope()),
            },
        })
    }
}

// ============================================================================
// TOML shadow structs (file parsing only)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    bot: Option<TomlBotConfig>,
    server: Option<TomlServerConfig>,
    auth: Option<TomlAuthConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlBotConfig {
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    app_password: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlServerConfig {
    #[serde(default)]
    port: Option<u16>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlAuthConfig {
    #[serde(default)]
    token_endpoint: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}
