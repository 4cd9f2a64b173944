//! Application configuration.
//!
//! Layered, lowest precedence first: built-in defaults, optional TOML file,
//! environment (`API_500_KEY`, `CSFLOAT_URL`, `BUX_RATE`), CLI flags.

use crate::error::{AppError, AppResult};
use crate::report::OutputFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use skinarb_market::{RetryPolicy, CASINO_MARKET_URL};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Config file used when neither `--config` nor `SKINARB_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "SKINARB_CONFIG";

pub const ENV_API_KEY: &str = "API_500_KEY";
pub const ENV_CSFLOAT_URL: &str = "CSFLOAT_URL";
pub const ENV_BUX_RATE: &str = "BUX_RATE";

/// 500.casino (Source A) settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct CasinoConfig {
    /// Market endpoint. Fixed; never read from file or environment.
    #[serde(skip, default = "default_casino_url")]
    pub url: String,
    /// Bearer token. Accepted from file or `API_500_KEY`, never written out.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    /// USD per BUX. Default: 0.0006.
    #[serde(default = "default_bux_rate")]
    pub bux_rate: Decimal,
    /// Request timeout (seconds). Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_casino_url() -> String {
    CASINO_MARKET_URL.to_string()
}

/// Default BUX to USD rate (0.0006).
pub fn default_bux_rate() -> Decimal {
    Decimal::new(6, 4)
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            url: default_casino_url(),
            api_key: String::new(),
            bux_rate: default_bux_rate(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CasinoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for CasinoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CasinoConfig")
            .field("url", &self.url)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("bux_rate", &self.bux_rate)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// CSFloat (Source B) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsFloatConfig {
    /// Full listings endpoint URL. Usually supplied via `CSFLOAT_URL`.
    #[serde(default)]
    pub url: String,
    /// Retries after a 429 response. Default: 3.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry (ms), doubled for each retry. Default: 2000.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Request timeout (seconds). Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    2000
}

impl Default for CsFloatConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CsFloatConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.initial_backoff_ms),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Deals shown. Default: 20.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Output format. Default: table.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_top_n() -> usize {
    20
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            format: OutputFormat::default(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub casino: CasinoConfig,
    #[serde(default)]
    pub csfloat: CsFloatConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Path precedence: `path` argument, then `SKINARB_CONFIG`, then
    /// `config/default.toml`. An explicit path must exist; the default path
    /// is optional and built-in defaults are used without it.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        let explicit = path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok());

        match explicit {
            Some(path) => Self::from_file(&path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)
            }
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// An empty or unparsable `BUX_RATE` falls back to the default rate.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.casino.api_key = key;
        }

        if let Some(url) = lookup(ENV_CSFLOAT_URL) {
            self.csfloat.url = url;
        }

        if let Some(raw) = lookup(ENV_BUX_RATE) {
            self.casino.bux_rate = match parse_rate(&raw) {
                Some(rate) => rate,
                None => {
                    if !raw.trim().is_empty() {
                        warn!(
                            value = %raw,
                            default = %default_bux_rate(),
                            "Unparsable BUX_RATE, using default"
                        );
                    }
                    default_bux_rate()
                }
            };
        }

        info!(
            bux_rate = %self.casino.bux_rate,
            csfloat_url = %self.csfloat.url,
            api_key_set = !self.casino.api_key.is_empty(),
            "Environment applied"
        );
    }

    /// Check configuration values.
    ///
    /// Returns Err for values that make the run meaningless and a list of
    /// warnings for settings that will most likely make a fetch fail.
    pub fn validate(&self) -> AppResult<Vec<String>> {
        if self.casino.bux_rate.is_sign_negative() && !self.casino.bux_rate.is_zero() {
            return Err(AppError::Config(format!(
                "bux_rate ({}) must be non-negative",
                self.casino.bux_rate
            )));
        }

        let mut warnings = Vec::new();
        if self.casino.api_key.is_empty() {
            warnings.push(format!(
                "{ENV_API_KEY} is not set; 500Casino will likely reject the request"
            ));
        }
        if self.csfloat.url.is_empty() {
            warnings.push(format!(
                "{ENV_CSFLOAT_URL} is not set; CSFloat listings will be empty"
            ));
        }
        if self.report.top_n == 0 {
            warnings.push("report.top_n is 0; no deals will be printed".to_string());
        }
        Ok(warnings)
    }
}

/// Parse the leading number of `raw`, ignoring whatever follows it.
fn parse_rate(raw: &str) -> Option<Decimal> {
    let number = numeric_prefix(raw.trim_start());
    if number.is_empty() {
        return None;
    }
    Decimal::from_str(number)
        .or_else(|_| Decimal::from_scientific(number))
        .ok()
}

/// Longest prefix of `s` shaped like `[-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let sign = usize::from(matches!(bytes.first(), Some(b'-')));
    let mut end = digits_from(sign);
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            end = frac_end;
        }
    }
    // A sign or a lone dot is not a number
    if end == sign {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_start = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.casino.url, CASINO_MARKET_URL);
        assert_eq!(config.casino.bux_rate, dec!(0.0006));
        assert_eq!(config.csfloat.max_retries, 3);
        assert_eq!(config.csfloat.initial_backoff_ms, 2000);
        assert_eq!(config.report.top_n, 20);
        assert_eq!(config.report.format, OutputFormat::Table);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env_with(env(&[
            ("API_500_KEY", "secret"),
            ("CSFLOAT_URL", "https://csfloat.com/api/v1/listings"),
            ("BUX_RATE", "0.00061"),
        ]));

        assert_eq!(config.casino.api_key, "secret");
        assert_eq!(config.csfloat.url, "https://csfloat.com/api/v1/listings");
        assert_eq!(config.casino.bux_rate, dec!(0.00061));
    }

    #[test]
    fn test_bux_rate_unparsable_falls_back_to_default() {
        let mut config = AppConfig::from_toml_str("[casino]\nbux_rate = 0.001\n").unwrap();
        config.apply_env_with(env(&[("BUX_RATE", "cheap")]));
        assert_eq!(config.casino.bux_rate, dec!(0.0006));
    }

    #[test]
    fn test_bux_rate_empty_falls_back_to_default() {
        let mut config = AppConfig::default();
        config.casino.bux_rate = dec!(0.5);
        config.apply_env_with(env(&[("BUX_RATE", "")]));
        assert_eq!(config.casino.bux_rate, dec!(0.0006));
    }

    #[test]
    fn test_bux_rate_unset_keeps_file_value() {
        let mut config = AppConfig::from_toml_str("[casino]\nbux_rate = 0.001\n").unwrap();
        config.apply_env_with(env(&[]));
        assert_eq!(config.casino.bux_rate, dec!(0.001));
    }

    #[test]
    fn test_bux_rate_scientific() {
        assert_eq!(parse_rate("6e-4"), Some(dec!(0.0006)));
        assert_eq!(parse_rate(" 0.0006 "), Some(dec!(0.0006)));
        assert_eq!(parse_rate("abc"), None);
    }

    #[test]
    fn test_bux_rate_numeric_prefix() {
        assert_eq!(parse_rate("0.0007abc"), Some(dec!(0.0007)));
        assert_eq!(parse_rate("0.0007 # promo"), Some(dec!(0.0007)));
        assert_eq!(parse_rate("6e-4x"), Some(dec!(0.0006)));
        assert_eq!(parse_rate("2e"), Some(dec!(2)));
        assert_eq!(parse_rate("-0.1"), Some(dec!(-0.1)));
        assert_eq!(parse_rate("-"), None);
        assert_eq!(parse_rate("."), None);
        assert_eq!(parse_rate("x0.5"), None);
    }

    #[test]
    fn test_bux_rate_with_trailing_text_applied() {
        let mut config = AppConfig::default();
        config.apply_env_with(env(&[("BUX_RATE", "0.0007abc")]));
        assert_eq!(config.casino.bux_rate, dec!(0.0007));
    }

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml_str(
            r#"
            [csfloat]
            url = "http://localhost:8080/listings"
            max_retries = 5
            initial_backoff_ms = 500

            [report]
            top_n = 10
            format = "json"

            [telemetry]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.csfloat.url, "http://localhost:8080/listings");
        assert_eq!(
            config.csfloat.retry_policy(),
            RetryPolicy::new(5, Duration::from_millis(500))
        );
        assert_eq!(config.report.top_n, 10);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert_eq!(config.telemetry.log_level, "debug");
        // Untouched sections keep their defaults
        assert_eq!(config.casino.bux_rate, dec!(0.0006));
    }

    #[test]
    fn test_casino_url_not_configurable() {
        let config = AppConfig::from_toml_str(
            r#"
            [casino]
            url = "http://evil.example"
            "#,
        )
        .unwrap();
        assert_eq!(config.casino.url, CASINO_MARKET_URL);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = AppConfig::from_toml_str("[report]\ntop_n = \"many\"\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_api_key_never_serialized() {
        let mut config = AppConfig::default();
        config.casino.api_key = "secret".to_string();

        let toml_str = toml::to_string(&config).unwrap();
        assert!(!toml_str.contains("secret"));
        assert!(toml_str.contains("bux_rate"));

        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_validate_warnings() {
        let config = AppConfig::default();
        let warnings = config.validate().unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("API_500_KEY"));
        assert!(warnings[1].contains("CSFLOAT_URL"));
    }

    #[test]
    fn test_validate_clean() {
        let mut config = AppConfig::default();
        config.apply_env_with(env(&[
            ("API_500_KEY", "secret"),
            ("CSFLOAT_URL", "http://localhost/listings"),
        ]));
        assert!(config.validate().unwrap().is_empty());
    }

    #[test]
    fn test_validate_negative_rate() {
        let mut config = AppConfig::default();
        config.casino.bux_rate = dec!(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = AppConfig::load(Some("/nonexistent/skinarb.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
