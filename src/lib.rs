// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # directory-pager
//!
//! Cursor-paginated streaming retrieval for directory listings.
//!
//! A listing is walked one page at a time by a producer task that follows
//! continuation cursors strictly in sequence and pushes each record into a
//! bounded channel. The consumer reads records in server order and, once the
//! channel closes, learns whether the listing was exhausted, failed or was
//! cancelled.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use directory_pager::{load_config, UserDirectory};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> directory_pager::Result<()> {
//!     let config = load_config("directory-pager.yaml")?;
//!     let directory = UserDirectory::from_config(&config)?;
//!
//!     let mut users = directory.list_users(&CancellationToken::new());
//!     while let Some(user) = users.recv().await {
//!         println!("RECV | User: {}", user.label());
//!     }
//!
//!     users.finish().await.into_result()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         UserDirectory                           │
//! │          list_users(token) → RecordStream<User>                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Decode   │   Stream    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ API Key  │ GET       │ Next link     │ JSON path │ Producer    │
//! │ Basic    │ Retry     │ Link header   │ Null skip │ Bounded mpsc│
//! │ Bearer   │ Rate Limit│ Cursor param  │           │ Cancel      │
//! │ OAuth2   │ Backoff   │ Page limit    │           │ Outcome     │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Response decoders
pub mod decode;

/// Cursors, pages and page fetchers
pub mod pagination;

/// Producer task and record stream
pub mod stream;

/// Directory users
pub mod directory;

/// Client configuration file
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, ClientConfig};
pub use directory::{User, UserDirectory};
pub use pagination::{Cursor, HttpPageFetcher, Page, PageFetcher, PageQuery};
pub use stream::{Outcome, PaginatorConfig, RecordStream, Stats, StreamPaginator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
