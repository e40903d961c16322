//! Decoder types and traits

use crate::error::Result;
use serde_json::Value;

/// Where OData-style listings keep the page's records
pub const DEFAULT_RECORD_PATH: &str = "value";

/// Trait for decoding response bodies into records
pub trait RecordDecoder<R>: Send + Sync {
    /// Decode one page body
    ///
    /// `page` is the 1-based page number, used only for diagnostics.
    /// Record-level problems yield `None` entries; only a body that has
    /// no usable record array is an error.
    fn decode(&self, body: &Value, page: u32) -> Result<Vec<Option<R>>>;
}
