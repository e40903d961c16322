//! Authentication module
//!
//! Supports: API Key, Basic, Bearer, OAuth2 client credentials
//!
//! The `Authenticator` applies credentials to every outgoing directory
//! request and caches access tokens for the OAuth2 grant until they expire.

mod authenticator;
mod types;

pub use authenticator::{extract_jsonpath, Authenticator};
pub(crate) use authenticator::lookup_path;
pub use types::{AuthConfig, CachedToken, Location, DEFAULT_GRAPH_SCOPE};
