//! Auth configuration types
//!
//! These types are deserialized straight from the `auth` section of the
//! client configuration file (after `${VAR}` expansion).

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Scope requested for app-only access to the directory
pub const DEFAULT_GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// API Key authentication (header or query)
    ApiKey {
        /// Where to place the API key
        #[serde(default)]
        location: Location,
        /// Header or query parameter name
        #[serde(default)]
        name: Option<String>,
        /// Prefix to add before the value (e.g., "Bearer ")
        #[serde(default)]
        prefix: Option<String>,
        /// The API key value
        value: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Static bearer token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// OAuth2 client credentials flow (app-only directory access)
    Oauth2ClientCredentials {
        /// Token endpoint URL
        token_url: String,
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
        /// Requested scopes
        #[serde(default = "default_scopes")]
        scopes: Vec<String>,
    },
}

fn default_scopes() -> Vec<String> {
    vec![DEFAULT_GRAPH_SCOPE.to_string()]
}

impl AuthConfig {
    /// Tenant-scoped client credentials against the Microsoft identity platform
    pub fn azure_client_credentials(
        tenant_id: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self::Oauth2ClientCredentials {
            token_url: format!("https://login.microsoftonline.com/{tenant_id}/oauth2/v2.0/token"),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: default_scopes(),
        }
    }

    /// Whether this auth type needs a token fetched before requests
    pub fn requires_token(&self) -> bool {
        matches!(self, Self::Oauth2ClientCredentials { .. })
    }
}

/// Seconds before expiry at which a cached token is refreshed
const EXPIRY_BUFFER_SECS: i64 = 30;

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    ///
    /// A non-positive lifetime is already expired. A lifetime past the
    /// range of `DateTime<Utc>` is treated as no expiration.
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let now = Utc::now();
        let expires_at = if seconds <= 0 {
            Some(now)
        } else {
            TimeDelta::try_seconds(seconds).and_then(|lifetime| now.checked_add_signed(lifetime))
        };
        Self { token, expires_at }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = TimeDelta::seconds(EXPIRY_BUFFER_SECS);
                match Utc::now().checked_add_signed(buffer) {
                    Some(deadline) => deadline >= expires_at,
                    None => true,
                }
            }
            None => false, // No expiration = never expires
        }
    }
}
