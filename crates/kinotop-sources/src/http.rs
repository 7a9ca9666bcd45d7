use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::trace;
use crate::error::SourceError;

const USER_AGENT: &str = concat!("kinotop/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client; every request it sends is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> Result<Client, SourceError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(SourceError::Client)
}

/// Turn a response into `T`, treating non-2xx statuses and undecodable
/// bodies as errors.
pub(crate) async fn read_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> Result<T, SourceError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| SourceError::Http { service, source })?;

    if !status.is_success() {
        return Err(SourceError::status(service, status, &body));
    }

    trace!(service, bytes = body.len(), "decoding response");
    decode(service, &body)
}

pub(crate) fn decode<T: DeserializeOwned>(service: &'static str, body: &str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|source| SourceError::Decode { service, source })
}

/// Join a base URL and a path without doubling or dropping the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
