//! HTTP-backed page fetcher

use super::strategies::NextCursor;
use super::types::{Cursor, Page, PageFetcher, PageQuery};
use crate::decode::{JsonDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Fetches listing pages through the authenticated `HttpClient`
#[derive(Debug)]
pub struct HttpPageFetcher<D = JsonDecoder> {
    client: Arc<HttpClient>,
    path: String,
    query: PageQuery,
    next: NextCursor,
    decoder: D,
    timeout: Option<Duration>,
    /// Number of the page most recently requested
    page: AtomicU32,
}

impl HttpPageFetcher<JsonDecoder> {
    /// Create a fetcher for the listing at `path` using OData conventions
    pub fn new(client: Arc<HttpClient>, path: impl Into<String>, query: PageQuery) -> Self {
        Self {
            client,
            path: path.into(),
            query,
            next: NextCursor::default(),
            decoder: JsonDecoder::default(),
            timeout: None,
            page: AtomicU32::new(0),
        }
    }
}

impl<D> HttpPageFetcher<D> {
    /// Use a different next-cursor strategy
    #[must_use]
    pub fn with_next_cursor(mut self, next: NextCursor) -> Self {
        self.next = next;
        self
    }

    /// Use a different record decoder
    pub fn with_decoder<E>(self, decoder: E) -> HttpPageFetcher<E> {
        HttpPageFetcher {
            client: self.client,
            path: self.path,
            query: self.query,
            next: self.next,
            decoder,
            timeout: self.timeout,
            page: self.page,
        }
    }

    /// Bound each fetch, retries included, by `timeout`
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The initial listing query
    pub fn query(&self) -> &PageQuery {
        &self.query
    }

    fn page_number(&self, cursor: &Cursor) -> u32 {
        if cursor.is_start() {
            self.page.store(1, Ordering::Relaxed);
            1
        } else {
            self.page.fetch_add(1, Ordering::Relaxed) + 1
        }
    }

    async fn fetch_page<R>(&self, cursor: &Cursor, page: u32) -> Result<Page<R>>
    where
        D: RecordDecoder<R>,
    {
        let (url, params) = self.next.request_for(cursor, &self.path, &self.query)?;
        trace!(page, url = %url, "Requesting page");

        let response = self.client.get_json(&url, &params).await?;
        let records = self.decoder.decode(&response.body, page)?;
        let next = self.next.extract(&response.body, &response.headers);

        Ok(Page::new(records, next))
    }
}

#[async_trait]
impl<R, D> PageFetcher<R> for HttpPageFetcher<D>
where
    R: DeserializeOwned + Send + 'static,
    D: RecordDecoder<R>,
{
    async fn fetch(&self, cursor: &Cursor) -> Result<Page<R>> {
        let page = self.page_number(cursor);

        let result = match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.fetch_page(cursor, page))
                .await
                .unwrap_or(Err(Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                })),
            None => self.fetch_page(cursor, page).await,
        };

        result.map_err(|e| Error::fetch(page, e))
    }
}
