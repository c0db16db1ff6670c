use thiserror::Error;

/// Errors returned by the Shopify Admin REST client.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status. `body` is the store's error
    /// payload (usually `{"errors": ...}`); non-JSON bodies are kept as a
    /// JSON string.
    #[error("Admin API returned {status} for {url}: {body}")]
    Api {
        status: u16,
        url: String,
        body: serde_json::Value,
    },

    #[error("rate limited on {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Admin API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("pagination limit reached: exceeded {max_pages} pages")]
    PaginationLimit { max_pages: usize },
}

impl AdminError {
    /// The store's structured response body, when the failure came from the
    /// store rather than the transport.
    #[must_use]
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            AdminError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AdminError::Api { status, .. } => Some(*status),
            AdminError::RateLimited { .. } => Some(429),
            AdminError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
