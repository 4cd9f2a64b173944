//! CSFloat listings client (Source B).
//!
//! Unauthenticated. Prices are already USD. The API rate-limits aggressively,
//! so 429 responses are retried with exponential backoff.

use crate::error::MarketResult;
use crate::http::{build_client, fetch_json};
use crate::normalize::{decode_entries, normalize_listing};
use crate::retry::{retry_on_rate_limit, RetryPolicy};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use skinarb_core::Listing;
use std::time::Duration;
use tracing::{debug, error, info};

const SOURCE: &str = "csfloat";

#[derive(Debug, Deserialize)]
struct CsFloatListingsResponse {
    /// Entries are decoded one by one so a bad entry only loses itself.
    listings: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawCsFloatListing {
    item: RawCsFloatItem,
    /// Price in USD.
    price: f64,
}

#[derive(Debug, Deserialize)]
struct RawCsFloatItem {
    market_hash_name: String,
}

/// Client for the CSFloat listings endpoint.
pub struct CsFloatClient {
    client: Client,
    url: String,
    retry: RetryPolicy,
}

impl CsFloatClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `url` - Full listings endpoint URL
    /// * `retry` - Backoff policy applied to 429 responses
    /// * `timeout` - Per-request timeout
    pub fn new(
        url: impl Into<String>,
        retry: RetryPolicy,
        timeout: Duration,
    ) -> MarketResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
            retry,
        })
    }

    /// Fetch and normalize all listings.
    ///
    /// Rate limiting is retried per the configured policy. Any other failure,
    /// or rate limiting that outlasts the retry budget, is logged and yields
    /// an empty list.
    pub async fn fetch_listings(&self) -> Vec<Listing> {
        match self.try_fetch_listings().await {
            Ok(listings) => {
                info!(count = listings.len(), "Fetched CSFloat listings");
                listings
            }
            Err(e) => {
                error!(status = ?e.status(), error = %e, "Error fetching CSFloat");
                Vec::new()
            }
        }
    }

    /// Fetch with rate-limit retries, surfacing the final error.
    pub async fn try_fetch_listings(&self) -> MarketResult<Vec<Listing>> {
        retry_on_rate_limit(&self.retry, SOURCE, || self.fetch_once()).await
    }

    async fn fetch_once(&self) -> MarketResult<Vec<Listing>> {
        debug!(url = %self.url, "Requesting CSFloat listings");

        let response: CsFloatListingsResponse = fetch_json(self.client.get(&self.url)).await?;
        Ok(normalize(response))
    }
}

fn normalize(response: CsFloatListingsResponse) -> Vec<Listing> {
    decode_entries::<RawCsFloatListing>(SOURCE, response.listings)
        .into_iter()
        .filter_map(|raw| {
            normalize_listing(SOURCE, raw.item.market_hash_name, raw.price, Decimal::ONE)
        })
        .collect()
}
