//! One-time initial load of the post store.
//!
//! The store starts in `Loading`. [`load`] fetches the collection once and
//! maps it to posts; [`settle`] moves the store to `Ready` or `Error`. Both
//! consult a [`CancelToken`]: once the consumer has been torn down the
//! result is dropped and the store is left untouched.

use super::store::PostStore;
use super::types::{posts_from_raw, Post};
use crate::remote::fetch_posts;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared cancellation flag for the bootstrap fetch.
///
/// Clones observe the same flag. Cancelling is one-way.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Settled bootstrap result: mapped posts or a human-readable error.
pub type BootstrapResult = Result<Vec<Post>, String>;

/// Fetch and map the post collection.
///
/// Returns `None` when the token was cancelled before the fetch settled.
pub async fn load(
    client: &reqwest::Client,
    endpoint: &str,
    timeout: Duration,
    token: &CancelToken,
) -> Option<BootstrapResult> {
    if token.is_cancelled() {
        return None;
    }

    let result = fetch_posts(client, endpoint, timeout)
        .await
        .map(posts_from_raw)
        .map_err(|e| e.to_string());

    if token.is_cancelled() {
        tracing::debug!("Bootstrap cancelled before completion, discarding result");
        return None;
    }
    Some(result)
}

/// Apply a settled result to the store.
///
/// Returns `false` without touching the store if the token was cancelled.
pub fn settle(store: &mut PostStore, token: &CancelToken, result: BootstrapResult) -> bool {
    if token.is_cancelled() {
        tracing::debug!("Ignoring bootstrap result after cancellation");
        return false;
    }
    match result {
        Ok(posts) => store.load(posts),
        Err(message) => store.fail(message),
    }
    true
}
