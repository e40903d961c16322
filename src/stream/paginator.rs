//! The producer side: cursor-following loop

use super::record_stream::RecordStream;
use super::types::{Outcome, PaginatorConfig, Stats};
use crate::error::Error;
use crate::pagination::{Cursor, Page, PageFetcher};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Drives a `PageFetcher` and flattens its pages into a record channel
#[derive(Debug, Clone, Default)]
pub struct StreamPaginator {
    config: PaginatorConfig,
}

impl StreamPaginator {
    /// Create a paginator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paginator with custom settings
    pub fn with_config(config: PaginatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Start the producer task and return the consumer end
    ///
    /// The producer observes a child of `token`, so cancelling the returned
    /// stream never cancels the caller's token. Must be called from within a
    /// tokio runtime.
    pub fn spawn<R, F>(&self, fetcher: F, token: &CancellationToken) -> RecordStream<R>
    where
        R: Send + 'static,
        F: PageFetcher<R> + 'static,
    {
        let (tx, rx) = mpsc::channel(self.config.buffer.max(1));
        let token = token.child_token();
        let producer_token = token.clone();
        let paginator = self.clone();

        let handle =
            tokio::spawn(async move { paginator.run(&fetcher, tx, &producer_token).await });

        RecordStream::new(rx, handle, token)
    }

    /// Run the pagination loop to completion
    ///
    /// `out` is consumed and dropped on return, which closes the channel
    /// for the reader on every path.
    pub async fn run<R, F>(
        &self,
        fetcher: &F,
        out: mpsc::Sender<R>,
        token: &CancellationToken,
    ) -> Outcome
    where
        R: Send,
        F: PageFetcher<R> + ?Sized,
    {
        let mut cursor = Cursor::Start;
        let mut stats = Stats::default();

        let outcome = 'pages: loop {
            if token.is_cancelled() {
                break Outcome::Cancelled(stats);
            }

            if let Some(max_pages) = self.config.max_pages {
                if stats.pages >= max_pages {
                    break Outcome::Failed {
                        error: Error::PageLimitExceeded { max_pages },
                        stats,
                    };
                }
            }

            let fetched = tokio::select! {
                biased;
                () = token.cancelled() => None,
                () = out.closed() => None,
                result = fetcher.fetch(&cursor) => Some(result),
            };

            let page = match fetched {
                None => break Outcome::Cancelled(stats),
                Some(Ok(page)) => page,
                Some(Err(error)) => {
                    break Outcome::Failed {
                        error: Error::fetch(stats.pages + 1, error),
                        stats,
                    }
                }
            };

            stats.pages += 1;
            let Page { records, next } = page;
            debug!(
                page = stats.pages,
                records = records.len(),
                has_next = !next.is_exhausted(),
                "Fetched page"
            );

            for (index, record) in records.into_iter().enumerate() {
                let Some(record) = record else {
                    stats.skipped += 1;
                    debug!(page = stats.pages, index, "Skipping null record");
                    continue;
                };

                // Cancellation is polled first, so no record is pushed once
                // the token fires, even when the channel has room.
                let sent = tokio::select! {
                    biased;
                    () = token.cancelled() => false,
                    result = out.send(record) => result.is_ok(),
                };

                if !sent {
                    break 'pages Outcome::Cancelled(stats);
                }
                stats.records += 1;
            }

            match next {
                Cursor::Exhausted => break Outcome::Complete(stats),
                next => cursor = next,
            }
        };

        match &outcome {
            Outcome::Complete(stats) => info!(
                pages = stats.pages,
                records = stats.records,
                skipped = stats.skipped,
                "Pagination complete"
            ),
            Outcome::Cancelled(stats) => warn!(
                pages = stats.pages,
                records = stats.records,
                "Pagination cancelled"
            ),
            Outcome::Failed { error, stats } => warn!(
                pages = stats.pages,
                records = stats.records,
                error = %error,
                "Pagination failed"
            ),
        }

        drop(out);
        outcome
    }
}
