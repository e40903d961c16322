//! Response decoder module
//!
//! Turns a decoded JSON page body into the page's records. Each element of
//! the record array becomes `Some(record)` or, when it is null or does not
//! match the record type, `None` so the paginator can skip it.

mod decoders;
mod types;

pub use decoders::JsonDecoder;
pub use types::{RecordDecoder, DEFAULT_RECORD_PATH};
