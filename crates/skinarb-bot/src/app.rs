//! Main application orchestration.
//!
//! A run is strictly sequential: 500Casino is fetched to completion before
//! CSFloat is requested, then the two sets are compared.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::report::DealReport;
use skinarb_detector::find_deals;
use skinarb_market::{CasinoClient, CsFloatClient};
use tracing::info;

/// Main application.
pub struct Application {
    config: AppConfig,
    casino: CasinoClient,
    csfloat: CsFloatClient,
}

impl Application {
    /// Create the application and its marketplace clients.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let casino = CasinoClient::new(
            config.casino.url.clone(),
            config.casino.api_key.clone(),
            config.casino.bux_rate,
            config.casino.timeout(),
        )?;
        let csfloat = CsFloatClient::new(
            config.csfloat.url.clone(),
            config.csfloat.retry_policy(),
            config.csfloat.timeout(),
        )?;

        Ok(Self {
            config,
            casino,
            csfloat,
        })
    }

    /// Fetch both marketplaces and compare.
    ///
    /// Never fails: a marketplace that cannot be fetched contributes no
    /// listings, which leaves the report empty.
    pub async fn run(&self) -> DealReport {
        info!("Fetching 500Casino offers...");
        let listings_a = self.casino.fetch_listings().await;

        info!("Fetching CSFloat offers...");
        let listings_b = self.csfloat.fetch_listings().await;

        info!(
            listings_a = listings_a.len(),
            listings_b = listings_b.len(),
            "Comparing prices..."
        );
        let deals = find_deals(&listings_a, &listings_b);

        match deals.first() {
            Some(best) => info!(
                deals = deals.len(),
                best = %best.name,
                best_discount = %best.discount_display(),
                "Comparison complete"
            ),
            None => info!("Comparison complete, no deals"),
        }

        DealReport::new(deals, listings_a.len(), listings_b.len())
    }

    /// Run and render the report with the configured format and size.
    pub async fn run_and_render(&self) -> AppResult<String> {
        let report = self.run().await;
        report.render(self.config.report.format, self.config.report.top_n)
    }
}
