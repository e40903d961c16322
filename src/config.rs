//! Client configuration file
//!
//! A single YAML (or JSON) document describes where the directory lives, how
//! to authenticate, how the transport behaves and how the listing is paged.
//! String values of the form `${VAR}` are expanded from the environment at
//! load time so secrets never have to live in the file.

use crate::auth::AuthConfig;
use crate::decode::DEFAULT_RECORD_PATH;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::pagination::{NextCursor, PageQuery, DEFAULT_PAGE_SIZE_PARAM};
use crate::stream::{PaginatorConfig, DEFAULT_BUFFER};
use crate::types::{BackoffType, JsonValue, StringMap};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Regex for matching environment references: ${NAME}
static ENV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env reference pattern is valid")
});

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration loaded from YAML or JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for directory requests (e.g. `https://graph.microsoft.com/v1.0`)
    pub base_url: String,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Listing and paging configuration
    #[serde(default)]
    pub listing: ListingConfig,
}

impl ClientConfig {
    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        url::Url::parse(&self.base_url)?;

        self.listing.validate()
    }

    /// Build the authenticated transport described by this config
    pub fn build_client(&self) -> Result<HttpClient> {
        HttpClient::with_auth(self.http.to_client_config(&self.base_url), self.auth.clone())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// Transport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff strategy
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Client-side request rate; no limiter when absent
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Burst size for the rate limiter (defaults to the rate)
    #[serde(default)]
    pub burst: Option<u32>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            requests_per_second: None,
            burst: None,
            headers: StringMap::new(),
        }
    }
}

impl HttpConfig {
    /// Convert to an `HttpClientConfig` rooted at `base_url`
    pub fn to_client_config(&self, base_url: &str) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        builder = match self.requests_per_second {
            Some(rps) => builder.rate_limit(RateLimiterConfig::new(rps, self.burst.unwrap_or(rps))),
            None => builder.no_rate_limit(),
        };

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60000
}

// ============================================================================
// Listing Config
// ============================================================================

/// How the listing is requested and paged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Listing endpoint, relative to the base URL
    #[serde(default = "default_path")]
    pub path: String,

    /// Requested page size
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Query parameter carrying the page size
    #[serde(default = "default_page_size_param")]
    pub page_size_param: String,

    /// OData `$filter` expression
    #[serde(default)]
    pub filter: Option<String>,

    /// Properties to select (`$select`)
    #[serde(default)]
    pub select: Vec<String>,

    /// Additional query parameters for the first request
    #[serde(default)]
    pub params: StringMap,

    /// Dot path to the record array in each page
    #[serde(default = "default_record_path")]
    pub record_path: String,

    /// Where the next-page cursor comes from
    #[serde(default)]
    pub next: NextCursor,

    /// Records buffered between producer and consumer
    #[serde(default = "default_buffer")]
    pub buffer: usize,

    /// Fail once this many pages have been fetched with more remaining
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// Bound on each page fetch, retries included
    #[serde(default)]
    pub fetch_timeout_seconds: Option<u64>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            page_size: default_page_size(),
            page_size_param: default_page_size_param(),
            filter: None,
            select: Vec::new(),
            params: StringMap::new(),
            record_path: default_record_path(),
            next: NextCursor::default(),
            buffer: default_buffer(),
            max_pages: None,
            fetch_timeout_seconds: None,
        }
    }
}

impl ListingConfig {
    /// Initial query sent with the first page request
    pub fn page_query(&self) -> PageQuery {
        let mut query = PageQuery::new(self.page_size).with_page_size_param(&self.page_size_param);

        if let Some(filter) = &self.filter {
            query = query.param("$filter", filter);
        }
        if !self.select.is_empty() {
            query = query.param("$select", self.select.join(","));
        }
        for (key, value) in &self.params {
            query = query.param(key, value);
        }
        query
    }

    /// Producer settings for the stream paginator
    pub fn paginator_config(&self) -> PaginatorConfig {
        let config = PaginatorConfig::new().with_buffer(self.buffer);
        match self.max_pages {
            Some(max_pages) => config.with_max_pages(max_pages),
            None => config,
        }
    }

    /// Per-fetch timeout, if configured
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_seconds.map(Duration::from_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(Error::missing_field("listing.path"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("listing.page_size", "must be greater than 0"));
        }
        if self.buffer == 0 {
            return Err(Error::invalid_value("listing.buffer", "must be greater than 0"));
        }
        if self.max_pages == Some(0) {
            return Err(Error::invalid_value("listing.max_pages", "must be greater than 0"));
        }
        if self.fetch_timeout_seconds == Some(0) {
            return Err(Error::invalid_value(
                "listing.fetch_timeout_seconds",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

fn default_path() -> String {
    "/users".to_string()
}

fn default_page_size() -> u32 {
    5
}

fn default_page_size_param() -> String {
    DEFAULT_PAGE_SIZE_PARAM.to_string()
}

fn default_record_path() -> String {
    DEFAULT_RECORD_PATH.to_string()
}

fn default_buffer() -> usize {
    DEFAULT_BUFFER
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a client config file
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let raw: JsonValue = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    parse_config(raw)
}

/// Load and validate a client config from a YAML (or JSON) string
pub fn load_config_from_str(content: &str) -> Result<ClientConfig> {
    let raw: JsonValue = serde_yaml::from_str(content)?;
    parse_config(raw)
}

fn parse_config(mut raw: JsonValue) -> Result<ClientConfig> {
    expand_env(&mut raw)?;
    let config: ClientConfig = serde_json::from_value(raw)?;
    config.validate()?;
    Ok(config)
}

/// Replace `${VAR}` references in every string of `value`
pub fn expand_env(value: &mut JsonValue) -> Result<()> {
    match value {
        JsonValue::String(s) => {
            if ENV_REGEX.is_match(s) {
                *s = expand_env_str(s)?;
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                expand_env(item)?;
            }
        }
        JsonValue::Object(map) => {
            for item in map.values_mut() {
                expand_env(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn expand_env_str(input: &str) -> Result<String> {
    let mut result = String::with_capacity(input.len());
    let mut last = 0;

    for caps in ENV_REGEX.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = std::env::var(name.as_str()).map_err(|_| {
            Error::config(format!(
                "Environment variable '{}' referenced in config is not set",
                name.as_str()
            ))
        })?;

        result.push_str(&input[last..whole.start()]);
        result.push_str(&value);
        last = whole.end();
    }

    result.push_str(&input[last..]);
    Ok(result)
}
