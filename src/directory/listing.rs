//! Paged access to the directory's user listing

use super::types::User;
use crate::config::{ClientConfig, ListingConfig};
use crate::decode::JsonDecoder;
use crate::error::Result;
use crate::http::HttpClient;
use crate::pagination::HttpPageFetcher;
use crate::stream::{RecordStream, StreamPaginator};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lists directory users as a cancellable record stream
#[derive(Debug, Clone)]
pub struct UserDirectory {
    client: Arc<HttpClient>,
    listing: ListingConfig,
}

impl UserDirectory {
    /// Create a directory over an authenticated client
    pub fn new(client: HttpClient, listing: ListingConfig) -> Self {
        Self {
            client: Arc::new(client),
            listing,
        }
    }

    /// Build the client and listing from a loaded config
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(config.build_client()?, config.listing.clone()))
    }

    /// Listing settings in use
    pub fn listing(&self) -> &ListingConfig {
        &self.listing
    }

    /// Page fetcher for the configured listing
    pub fn fetcher(&self) -> HttpPageFetcher {
        let fetcher = HttpPageFetcher::new(
            Arc::clone(&self.client),
            &self.listing.path,
            self.listing.page_query(),
        )
        .with_next_cursor(self.listing.next.clone())
        .with_decoder(JsonDecoder::with_path(&self.listing.record_path));

        match self.listing.fetch_timeout() {
            Some(timeout) => fetcher.with_timeout(timeout),
            None => fetcher,
        }
    }

    /// Start streaming users in server order
    ///
    /// Cancelling `token` (or dropping the stream) stops the producer after
    /// the in-flight request.
    pub fn list_users(&self, token: &CancellationToken) -> RecordStream<User> {
        debug!(
            path = %self.listing.path,
            page_size = self.listing.page_size,
            "Listing users"
        );
        StreamPaginator::with_config(self.listing.paginator_config()).spawn(self.fetcher(), token)
    }
}
