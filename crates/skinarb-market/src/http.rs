//! Shared HTTP plumbing for the marketplace clients.

use crate::error::{MarketError, MarketResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Error bodies longer than this are cut before they reach the logs.
const MAX_ERROR_BODY_LEN: usize = 256;

pub(crate) fn build_client(timeout: Duration) -> MarketResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| MarketError::HttpClient(format!("Failed to create HTTP client: {e}")))
}

/// Send a request and decode a JSON body.
///
/// 429 maps to `MarketError::RateLimited` so callers can retry on it
/// without inspecting status codes themselves.
pub(crate) async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder) -> MarketResult<T> {
    let response = request
        .send()
        .await
        .map_err(|e| MarketError::HttpClient(format!("HTTP request failed: {e}")))?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketError::RateLimited);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MarketError::Status {
            status: status.as_u16(),
            body: truncate_body(body),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| MarketError::HttpClient(format!("Failed to read response body: {e}")))?;

    serde_json::from_slice(&bytes).map_err(|e| MarketError::Parse(e.to_string()))
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY_LEN {
        let mut cut = MAX_ERROR_BODY_LEN;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}
