//! Loads everything one dashboard run needs, in order.

use crate::config::Config;
use crate::error::Result;
use crate::sources::{load_forecast, YahooFinanceClient};
use crate::types::{ForecastSeries, HistoricalSeries};
use chrono::NaiveDate;
use tracing::info;

/// Inputs for one pipeline run.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub history: HistoricalSeries,
    pub forecasts: Vec<ForecastSeries>,
}

/// Data loader for market history and forecast files.
pub struct DataLoader {
    yahoo: YahooFinanceClient,
}

impl DataLoader {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            yahoo: YahooFinanceClient::new(config.yahoo_base_url.clone())?,
        })
    }

    /// Fetch history over `[config.start_date, today)` and read both forecasts.
    pub async fn load(&self, config: &Config, today: NaiveDate) -> Result<DashboardData> {
        info!(
            "Loading {} from {} to {}",
            config.symbol, config.start_date, today
        );

        let history = self
            .yahoo
            .get_daily_history(&config.symbol, config.start_date, today)
            .await?;

        let forecasts = [&config.lstm, &config.xgboost]
            .into_iter()
            .map(|source| load_forecast(&source.model, &source.path, config.horizon))
            .collect::<Result<Vec<_>>>()?;

        Ok(DashboardData { history, forecasts })
    }
}
