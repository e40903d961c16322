//! Pagination types and traits
//!
//! Defines the core pagination abstractions shared by the fetcher and the
//! stream paginator.

use crate::error::Result;
use crate::types::StringMap;
use async_trait::async_trait;
use std::sync::Arc;

/// Query parameter carrying the page size on OData listings
pub const DEFAULT_PAGE_SIZE_PARAM: &str = "$top";

/// Position in a cursor-paginated listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cursor {
    /// First request, carries the initial query
    #[default]
    Start,
    /// Opaque continuation token (next link, skip token, ...)
    Next(String),
    /// No further pages
    Exhausted,
}

impl Cursor {
    /// Build a cursor from an optional server token
    ///
    /// Absent and empty tokens both mean the listing is exhausted.
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.is_empty() => Self::Next(token),
            _ => Self::Exhausted,
        }
    }

    /// Check if this is the first request
    pub fn is_start(&self) -> bool {
        matches!(self, Self::Start)
    }

    /// Check if the listing is exhausted
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// One page of a listing
///
/// `None` entries are records the server sent as null (or that could not
/// be decoded); they are never delivered to consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<R> {
    /// Records in server order
    pub records: Vec<Option<R>>,
    /// Where the next page starts
    pub next: Cursor,
}

impl<R> Page<R> {
    /// Create a page
    pub fn new(records: Vec<Option<R>>, next: Cursor) -> Self {
        Self { records, next }
    }

    /// Create a page followed by another one
    pub fn with_next(records: Vec<Option<R>>, token: impl Into<String>) -> Self {
        Self::new(records, Cursor::from_token(Some(token.into())))
    }

    /// Create the final page
    pub fn last(records: Vec<Option<R>>) -> Self {
        Self::new(records, Cursor::Exhausted)
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        self.next.is_exhausted()
    }
}

/// Initial listing query, sent with the first request only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Records per page
    pub page_size: u32,
    /// Parameter name for the page size
    pub page_size_param: String,
    /// Opaque filter parameters (e.g. `$filter`, `$select`)
    pub params: StringMap,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PageQuery {
    /// Create a query with the given page size
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            page_size_param: DEFAULT_PAGE_SIZE_PARAM.to_string(),
            params: StringMap::new(),
        }
    }

    /// Use a different page size parameter name
    #[must_use]
    pub fn with_page_size_param(mut self, param: impl Into<String>) -> Self {
        self.page_size_param = param.into();
        self
    }

    /// Add a filter parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// All query parameters for the first request
    pub fn to_params(&self) -> StringMap {
        let mut params = self.params.clone();
        params.insert(self.page_size_param.clone(), self.page_size.to_string());
        params
    }
}

/// Retrieves one page per call
///
/// Implementations perform exactly one round trip, never retry and never
/// cache. Every failure is reported as `Error::Fetch`.
#[async_trait]
pub trait PageFetcher<R>: Send + Sync {
    /// Fetch the page at `cursor` (`Start` or a token from the previous page)
    async fn fetch(&self, cursor: &Cursor) -> Result<Page<R>>;
}

#[async_trait]
impl<R, F> PageFetcher<R> for Arc<F>
where
    R: Send + 'static,
    F: PageFetcher<R> + ?Sized,
{
    async fn fetch(&self, cursor: &Cursor) -> Result<Page<R>> {
        (**self).fetch(cursor).await
    }
}

#[async_trait]
impl<R, F> PageFetcher<R> for Box<F>
where
    R: Send + 'static,
    F: PageFetcher<R> + ?Sized,
{
    async fn fetch(&self, cursor: &Cursor) -> Result<Page<R>> {
        (**self).fetch(cursor).await
    }
}
