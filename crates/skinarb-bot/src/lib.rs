//! skinarb: finds items listed cheaper on 500.casino than on CSFloat.
//!
//! One run is strictly sequential:
//! - fetch 500.casino listings (Source A)
//! - fetch CSFloat listings (Source B), backing off on rate limits
//! - join by market-hash name and rank the cheaper-on-A items by discount
//! - print the top N

pub mod app;
pub mod config;
pub mod error;
pub mod report;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use report::{DealReport, OutputFormat};
