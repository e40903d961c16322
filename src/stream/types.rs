//! Stream paginator types

use crate::error::{Error, Result};

/// Default capacity of the record channel
pub const DEFAULT_BUFFER: usize = 16;

/// Configuration for a paginated stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatorConfig {
    /// Records buffered between producer and consumer
    pub buffer: usize,
    /// Stop with an error after this many pages if the listing continues
    pub max_pages: Option<u32>,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER,
            max_pages: None,
        }
    }
}

impl PaginatorConfig {
    /// Create a new paginator config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set channel capacity (zero is treated as one)
    #[must_use]
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer.max(1);
        self
    }

    /// Cap the number of pages fetched
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

/// Counters for one pagination run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Pages fetched successfully
    pub pages: u32,
    /// Records delivered to the channel
    pub records: u64,
    /// Null or undecodable records skipped
    pub skipped: u64,
}

/// How a pagination run ended
#[derive(Debug)]
pub enum Outcome {
    /// Every page was fetched and every record delivered
    Complete(Stats),
    /// Stopped by cancellation (or by the consumer going away)
    Cancelled(Stats),
    /// Stopped by a fetch failure or the page limit
    Failed {
        /// What went wrong
        error: Error,
        /// Progress made before the failure
        stats: Stats,
    },
}

impl Outcome {
    /// Progress counters, whatever the outcome
    pub fn stats(&self) -> Stats {
        match self {
            Self::Complete(stats) | Self::Cancelled(stats) | Self::Failed { stats, .. } => *stats,
        }
    }

    /// Check if the listing was exhausted
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Check if the run was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Check if the run failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Convert to a `Result`, cancellation becoming `Error::Cancelled`
    pub fn into_result(self) -> Result<Stats> {
        match self {
            Self::Complete(stats) => Ok(stats),
            Self::Cancelled(stats) => Err(Error::Cancelled { pages: stats.pages }),
            Self::Failed { error, .. } => Err(error),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        match self {
            Self::Complete(_) => write!(f, "complete")?,
            Self::Cancelled(_) => write!(f, "cancelled")?,
            Self::Failed { error, .. } => write!(f, "failed ({error})")?,
        }
        write!(
            f,
            ": {} records from {} pages, {} skipped",
            stats.records, stats.pages, stats.skipped
        )
    }
}
