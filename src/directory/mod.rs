//! User directory module
//!
//! A small facade over the pagination stack for the directory's `/users`
//! listing: builds the `HttpPageFetcher` from a `ListingConfig` and hands the
//! records to a `StreamPaginator`.

mod listing;
mod types;

pub use listing::UserDirectory;
pub use types::User;

#[cfg(test)]
mod tests;
