//! Remote post source.
//!
//! A single read-only HTTP endpoint returning a JSON array of post records.
//! The [`fetcher`] performs one GET with a timeout, rejects non-2xx statuses
//! and oversized bodies, and decodes the records into [`RawPost`](crate::posts::RawPost).

mod fetcher;

pub use fetcher::{build_client, fetch_posts, FetchError, DEFAULT_TIMEOUT, MAX_RESPONSE_SIZE};
