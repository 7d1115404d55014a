use crate::posts::RawPost;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;

/// Response bodies above this size are rejected.
pub const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching the post collection.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid UTF-8 in response")]
    InvalidUtf8,
    /// Body was not a JSON array of post records
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Build the HTTP client used for the bootstrap fetch.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(1)
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(timeout)
        .build()
}

/// GET `endpoint` and decode the post collection.
///
/// One attempt only: any failure is reported to the caller as-is.
pub async fn fetch_posts(
    client: &reqwest::Client,
    endpoint: &str,
    timeout: Duration,
) -> Result<Vec<RawPost>, FetchError> {
    tracing::debug!(endpoint = %endpoint, "Fetching posts");

    let response = tokio::time::timeout(timeout, client.get(endpoint).send())
        .await
        .map_err(|_| FetchError::Timeout(timeout.as_secs()))?
        .map_err(FetchError::Network)?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), endpoint = %endpoint, "Post fetch returned error status");
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = tokio::time::timeout(timeout, read_limited_text(response, MAX_RESPONSE_SIZE))
        .await
        .map_err(|_| FetchError::Timeout(timeout.as_secs()))??;

    let posts: Vec<RawPost> = serde_json::from_str(&body)?;
    tracing::info!(count = posts.len(), "Fetched posts");
    Ok(posts)
}

async fn read_limited_text(response: reqwest::Response, limit: usize) -> Result<String, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if usize::try_from(len).map_or(true, |len| len > limit) {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| FetchError::InvalidUtf8)
}
