use reqwest::StatusCode;
use thiserror::Error;

/// Longest response body excerpt kept in a status error.
const BODY_EXCERPT_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {service} failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    pub(crate) fn status(service: &'static str, status: StatusCode, body: &str) -> Self {
        let body: String = body.chars().take(BODY_EXCERPT_LEN).collect();
        SourceError::Status { service, status, body }
    }

    /// True for 429 responses, which callers may want to log differently.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SourceError::Status { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS)
    }
}
