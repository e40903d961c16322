//! Streaming pagination module
//!
//! Turns a `PageFetcher` into one continuous, cancellable stream of records.
//!
//! # Overview
//!
//! `StreamPaginator` runs as an independent producer task. It follows
//! cursors strictly in sequence (one fetch in flight at a time), pushes each
//! non-null record into a bounded channel and closes the channel exactly
//! once, whatever the reason it stopped. The consumer side is a
//! `RecordStream`, which yields records and then reports the terminal
//! `Outcome` so "exhausted", "failed" and "cancelled" can be told apart.
//!
//! ```text
//!  PageFetcher ──fetch(cursor)──▶ StreamPaginator ──mpsc(buffer)──▶ RecordStream
//!       ▲                              │                                │
//!       └────── next cursor ◀──────────┘          finish() ◀── Outcome ─┘
//! ```

mod paginator;
mod record_stream;
mod types;

pub use paginator::StreamPaginator;
pub use record_stream::RecordStream;
pub use types::{Outcome, PaginatorConfig, Stats, DEFAULT_BUFFER};
