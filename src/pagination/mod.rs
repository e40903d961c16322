//! Pagination module
//!
//! Supports: OData next links, Link headers (RFC 5988), cursor parameters
//!
//! # Overview
//!
//! A listing is walked one page at a time. `PageFetcher` performs exactly one
//! round trip per call and reports the page's records together with the
//! `Cursor` for the next page. `NextCursor` strategies know where a given API
//! keeps its continuation token, and `HttpPageFetcher` ties them to the
//! authenticated `HttpClient`.

mod fetcher;
mod strategies;
mod types;

pub use fetcher::HttpPageFetcher;
pub use strategies::{parse_link_header, NextCursor, DEFAULT_NEXT_LINK_PATH};
pub use types::{Cursor, Page, PageFetcher, PageQuery, DEFAULT_PAGE_SIZE_PARAM};

#[cfg(test)]
mod tests;
