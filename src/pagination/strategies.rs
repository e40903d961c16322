//! Next-cursor strategies
//!
//! Each strategy knows where one paging convention keeps its continuation
//! token and how to turn a cursor back into a request.

use super::types::{Cursor, PageQuery};
use crate::auth::extract_jsonpath;
use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body field holding the next link on OData listings
pub const DEFAULT_NEXT_LINK_PATH: &str = "@odata.nextLink";

fn default_next_link_path() -> String {
    DEFAULT_NEXT_LINK_PATH.to_string()
}

fn default_rel() -> String {
    "next".to_string()
}

/// Where the continuation token of a listing lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NextCursor {
    /// Absolute next-page URL in the response body (OData `@odata.nextLink`)
    ///
    /// The URL already encodes the query, so it is requested verbatim.
    NextLink {
        /// Path to the URL in the body
        #[serde(default = "default_next_link_path")]
        path: String,
    },

    /// Next-page URL in the `Link` header
    ///
    /// Format: `Link: <https://api.example.com/...?page=2>; rel="next", ...`
    LinkHeader {
        /// Rel value to follow
        #[serde(default = "default_rel")]
        rel: String,
    },

    /// Token in the body, sent back as a query parameter
    ///
    /// The initial query is repeated alongside the token, e.g.
    /// `?limit=50&starting_after=obj_123`.
    CursorParam {
        /// Query parameter name for the token
        param: String,
        /// Path to the token in the body
        path: String,
    },
}

impl Default for NextCursor {
    fn default() -> Self {
        Self::NextLink {
            path: default_next_link_path(),
        }
    }
}

impl NextCursor {
    /// Follow OData next links at the default path
    pub fn next_link() -> Self {
        Self::default()
    }

    /// Follow `Link` headers with the given rel
    pub fn link_header(rel: impl Into<String>) -> Self {
        Self::LinkHeader { rel: rel.into() }
    }

    /// Send a body token back under `param`
    pub fn cursor_param(param: impl Into<String>, path: impl Into<String>) -> Self {
        Self::CursorParam {
            param: param.into(),
            path: path.into(),
        }
    }

    /// Read the cursor for the page after this response
    pub fn extract(&self, body: &Value, headers: &HeaderMap) -> Cursor {
        let token = match self {
            Self::NextLink { path } | Self::CursorParam { path, .. } => {
                extract_jsonpath(body, path)
            }
            Self::LinkHeader { rel } => headers
                .get("link")
                .and_then(|v| v.to_str().ok())
                .and_then(|header| parse_link_header(header, rel)),
        };
        Cursor::from_token(token)
    }

    /// Build the request for the page at `cursor`
    ///
    /// Returns the URL (relative to the client's base URL unless absolute)
    /// and its query parameters.
    pub fn request_for(
        &self,
        cursor: &Cursor,
        path: &str,
        query: &PageQuery,
    ) -> Result<(String, StringMap)> {
        let token = match cursor {
            Cursor::Start => return Ok((path.to_string(), query.to_params())),
            Cursor::Next(token) => token,
            Cursor::Exhausted => {
                return Err(Error::Other(
                    "cannot request a page past the end of the listing".to_string(),
                ))
            }
        };

        match self {
            Self::NextLink { .. } | Self::LinkHeader { .. } => {
                Ok((token.clone(), StringMap::new()))
            }
            Self::CursorParam { param, .. } => {
                let mut params = query.to_params();
                params.insert(param.clone(), token.clone());
                Ok((path.to_string(), params))
            }
        }
    }
}

/// Parse a Link header and extract the URL for the given rel
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // Link header format: <url>; rel="next", <url>; rel="prev"
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r.split_whitespace().any(|r| r == target_rel) {
                return Some(u.to_string());
            }
        }
    }

    None
}
