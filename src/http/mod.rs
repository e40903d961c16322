//! HTTP client module
//!
//! The authenticated transport every page request goes through.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Integration with auth module
//! - **Next links**: Absolute URLs bypass the base URL untouched

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, JsonResponse};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
