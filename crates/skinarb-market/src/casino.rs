//! 500.casino trading market client (Source A).
//!
//! Prices are quoted in BUX, the site's internal currency, and converted to
//! USD with a fixed rate supplied by configuration.

use crate::error::MarketResult;
use crate::http::{build_client, fetch_json};
use crate::normalize::{decode_entries, normalize_listing};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use skinarb_core::Listing;
use std::time::Duration;
use tracing::{debug, error, info};

/// Trading market endpoint. Not configurable.
pub const CASINO_MARKET_URL: &str = "https://api.500.casino/trading/market";

const SOURCE: &str = "500casino";

/// Raw market response.
#[derive(Debug, Deserialize)]
struct CasinoMarketResponse {
    /// Entries are decoded one by one so a bad entry only loses itself.
    listings: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawCasinoListing {
    item: RawCasinoItem,
    /// Price in BUX.
    price: f64,
}

#[derive(Debug, Deserialize)]
struct RawCasinoItem {
    #[serde(rename = "marketHashName")]
    market_hash_name: String,
}

/// Client for the 500.casino trading market.
pub struct CasinoClient {
    client: Client,
    url: String,
    api_key: String,
    bux_rate: Decimal,
}

impl CasinoClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `url` - Market endpoint, normally [`CASINO_MARKET_URL`]
    /// * `api_key` - Bearer token
    /// * `bux_rate` - USD per BUX
    /// * `timeout` - Per-request timeout
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        bux_rate: Decimal,
        timeout: Duration,
    ) -> MarketResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
            api_key: api_key.into(),
            bux_rate,
        })
    }

    /// Fetch and normalize all listings.
    ///
    /// Failures are logged with the HTTP status (when there is one) and
    /// yield an empty list. No retry.
    pub async fn fetch_listings(&self) -> Vec<Listing> {
        match self.try_fetch_listings().await {
            Ok(listings) => {
                info!(count = listings.len(), "Fetched 500Casino listings");
                listings
            }
            Err(e) => {
                error!(status = ?e.status(), error = %e, "Error fetching 500Casino");
                Vec::new()
            }
        }
    }

    /// Fetch and normalize all listings, surfacing errors.
    pub async fn try_fetch_listings(&self) -> MarketResult<Vec<Listing>> {
        debug!(url = %self.url, "Requesting 500Casino market");

        let request = self
            .client
            .get(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json");

        let response: CasinoMarketResponse = fetch_json(request).await?;
        Ok(normalize(response, self.bux_rate))
    }
}

fn normalize(response: CasinoMarketResponse, bux_rate: Decimal) -> Vec<Listing> {
    decode_entries::<RawCasinoListing>(SOURCE, response.listings)
        .into_iter()
        .filter_map(|raw| {
            normalize_listing(SOURCE, raw.item.market_hash_name, raw.price, bux_rate)
        })
        .collect()
}
