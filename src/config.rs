use crate::error::{AppError, Result};
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

/// Forecast file configuration for one external model.
#[derive(Debug, Clone)]
pub struct ForecastSourceConfig {
    /// Model name used as the trace label.
    pub model: String,
    /// CSV path, relative to the working directory.
    pub path: PathBuf,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Asset ticker as understood by the market data provider.
    pub symbol: String,
    /// First day of the historical window.
    pub start_date: NaiveDate,
    /// Number of future calendar days to project.
    pub horizon: usize,
    /// Trailing window of the simple moving average.
    pub sma_window: usize,
    /// Number of most recent real closes to plot.
    pub display_points: usize,
    /// Neural-network forecast file.
    pub lstm: ForecastSourceConfig,
    /// Gradient-boosted-tree forecast file.
    pub xgboost: ForecastSourceConfig,
    /// Yahoo Finance API base URL.
    pub yahoo_base_url: String,
}

pub const DEFAULT_SYMBOL: &str = "BTC-USD";
pub const DEFAULT_HORIZON: usize = 14;
pub const DEFAULT_SMA_WINDOW: usize = 5;
pub const DEFAULT_DISPLAY_POINTS: usize = 50;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parse an optional setting, falling back to the default when absent or invalid.
fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Ignoring invalid {}={:?}, using default", key, value);
                default
            }
        },
        None => default,
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lstm_path = lookup("PRICECAST_LSTM_CSV")
            .unwrap_or_else(|| "lstm_cnn_btc_price.csv".to_string());
        let xgboost_path = lookup("PRICECAST_XGBOOST_CSV")
            .unwrap_or_else(|| "xgboost_btc_price.csv".to_string());

        Self {
            symbol: lookup("PRICECAST_SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
            start_date: parse_or(
                "PRICECAST_START_DATE",
                lookup("PRICECAST_START_DATE"),
                default_start_date(),
            ),
            horizon: parse_or(
                "PRICECAST_HORIZON",
                lookup("PRICECAST_HORIZON"),
                DEFAULT_HORIZON,
            ),
            sma_window: parse_or(
                "PRICECAST_SMA_WINDOW",
                lookup("PRICECAST_SMA_WINDOW"),
                DEFAULT_SMA_WINDOW,
            ),
            display_points: parse_or(
                "PRICECAST_DISPLAY_POINTS",
                lookup("PRICECAST_DISPLAY_POINTS"),
                DEFAULT_DISPLAY_POINTS,
            ),
            lstm: ForecastSourceConfig {
                model: "LSTM+CNN".to_string(),
                path: PathBuf::from(lstm_path),
            },
            xgboost: ForecastSourceConfig {
                model: "XGBoost".to_string(),
                path: PathBuf::from(xgboost_path),
            },
            yahoo_base_url: lookup("YAHOO_BASE_URL")
                .unwrap_or_else(|| DEFAULT_YAHOO_BASE_URL.to_string()),
        }
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(AppError::MalformedInput("symbol must not be empty".into()));
        }
        if self.horizon == 0 {
            return Err(AppError::MalformedInput("horizon must be at least 1".into()));
        }
        if self.sma_window == 0 {
            return Err(AppError::MalformedInput(
                "SMA window must be at least 1".into(),
            ));
        }
        if self.display_points == 0 {
            return Err(AppError::MalformedInput(
                "display points must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Dashboard page title, e.g. "BTC Price Projection 14-Day".
    pub fn page_title(&self) -> String {
        format!("{} Price Projection {}-Day", self.asset_name(), self.horizon)
    }

    /// Chart title, e.g. "BTC Price".
    pub fn chart_title(&self) -> String {
        format!("{} Price", self.asset_name())
    }

    /// Subtitle naming the forecast models.
    pub fn subtitle(&self) -> String {
        format!("Using {} and {}", self.lstm.model, self.xgboost.model)
    }

    /// Base asset of the ticker ("BTC" for "BTC-USD").
    pub fn asset_name(&self) -> &str {
        self.symbol.split('-').next().unwrap_or(&self.symbol)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
