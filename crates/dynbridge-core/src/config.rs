//! Configuration types for the bridge
//!
//! This module defines all configuration structures used throughout the crate.
//! Configuration is read once at startup and handed to the constructors of
//! the provider client and the [`UpdateBridge`](crate::UpdateBridge).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default DynDNS username
pub const DEFAULT_USERNAME: &str = "admin";

/// Default listen port of the update endpoint
pub const DEFAULT_PORT: u16 = 8080;

/// Default Hetzner DNS API base URL
pub const DEFAULT_HETZNER_API_URL: &str = "https://dns.hetzner.com/api/v1";

/// Main bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Credentials routers must present on the update endpoint
    pub credentials: Credentials,

    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl BridgeConfig {
    /// Create a configuration with default server settings
    pub fn new(credentials: Credentials, provider: ProviderConfig) -> Self {
        Self {
            credentials,
            provider,
            server: ServerConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.credentials.validate()?;
        self.provider.validate()?;
        self.server.validate()?;

        Ok(())
    }
}

/// Basic-Auth credentials of the update endpoint
///
/// Compared verbatim against what the router presents; no hashing.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_username")]
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether the presented pair matches exactly
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.username.is_empty() {
            return Err(crate::Error::config("DynDNS username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(crate::Error::config("DynDNS password cannot be empty"));
        }
        Ok(())
    }
}

// Keeps the password out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .finish()
    }
}

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Hetzner DNS API
    Hetzner {
        /// API token sent in the `Auth-API-Token` header
        api_key: String,
        /// Base URL override (tests, proxies)
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl ProviderConfig {
    /// Hetzner configuration against the public API
    pub fn hetzner(api_key: impl Into<String>) -> Self {
        ProviderConfig::Hetzner {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Hetzner { api_key, base_url } => {
                if api_key.is_empty() {
                    return Err(crate::Error::config("Hetzner DNS API key cannot be empty"));
                }
                if let Some(url) = base_url
                    && !url.starts_with("https://")
                    && !url.starts_with("http://")
                {
                    return Err(crate::Error::config(format!(
                        "Hetzner DNS API URL must use HTTP or HTTPS scheme. Got: {}",
                        url
                    )));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Hetzner { .. } => "hetzner",
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Hetzner { base_url, .. } => f
                .debug_struct("Hetzner")
                .field("api_key", &"<REDACTED>")
                .field("base_url", base_url)
                .finish(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the update endpoint listens on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.port == 0 {
            return Err(crate::Error::config("Listen port must be > 0"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
