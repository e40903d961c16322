//! The consumer side of a paginated stream

use super::types::{Outcome, Stats};
use crate::error::Error;
use futures::{Stream, StreamExt};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

pin_project! {
    /// Records of a paginated listing, in server order
    ///
    /// Ends when the producer closes the channel. Call [`RecordStream::finish`]
    /// afterwards to learn whether the listing was exhausted, failed or was
    /// cancelled.
    pub struct RecordStream<R> {
        #[pin]
        inner: ReceiverStream<R>,
        handle: JoinHandle<Outcome>,
        token: CancellationToken,
    }
}

impl<R> RecordStream<R> {
    pub(crate) fn new(
        receiver: mpsc::Receiver<R>,
        handle: JoinHandle<Outcome>,
        token: CancellationToken,
    ) -> Self {
        Self {
            inner: ReceiverStream::new(receiver),
            handle,
            token,
        }
    }

    /// Receive the next record, `None` once the producer has closed the stream
    pub async fn recv(&mut self) -> Option<R> {
        self.inner.next().await
    }

    /// Ask the producer to stop
    ///
    /// Records already buffered are still delivered before the stream ends.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Token observed by the producer
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Wait for the producer and return how the run ended
    ///
    /// Dropping the unread remainder of the stream stops the producer, so
    /// calling this before the stream is drained yields `Outcome::Cancelled`
    /// unless the producer had already finished.
    pub async fn finish(self) -> Outcome {
        let Self { inner, handle, .. } = self;
        drop(inner);

        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Failed {
                error: Error::Other(format!("Paginator task failed: {e}")),
                stats: Stats::default(),
            },
        }
    }

    /// Drain every record, then return them with the outcome
    pub async fn collect_all(mut self) -> (Vec<R>, Outcome) {
        let mut records = Vec::new();
        while let Some(record) = self.recv().await {
            records.push(record);
        }
        let outcome = self.finish().await;
        (records, outcome)
    }
}

impl<R> Stream for RecordStream<R> {
    type Item = R;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<R>> {
        self.project().inner.poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<R> std::fmt::Debug for RecordStream<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("producer_finished", &self.handle.is_finished())
            .field("cancelled", &self.token.is_cancelled())
            .finish_non_exhaustive()
    }
}
