//! Yahoo Finance API client for daily price history.
//!
//! Uses the unofficial chart endpoint (no API key). Crypto pairs such as
//! `BTC-USD` trade every day, so the daily series has no weekend gaps.

use crate::error::{AppError, Result};
use crate::types::{HistoricalSeries, PricePoint};
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Unix seconds at midnight UTC of `date`.
fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Query parameters for daily bars over `[start, end)`.
pub fn history_query(start: NaiveDate, end: NaiveDate) -> Vec<(&'static str, String)> {
    vec![
        ("period1", unix_midnight(start).to_string()),
        ("period2", unix_midnight(end).to_string()),
        ("interval", "1d".to_string()),
        ("includePrePost", "false".to_string()),
    ]
}

/// Turn a chart payload into a deduplicated, chronological close series.
pub fn parse_chart_response(symbol: &str, body: &str) -> Result<HistoricalSeries> {
    let data: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = data.chart.error {
        return Err(AppError::DataUnavailable(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::MalformedInput("No results in Yahoo response".into()))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| AppError::MalformedInput("No timestamps in Yahoo response".into()))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .ok_or_else(|| AppError::MalformedInput("No quote data in Yahoo response".into()))?;

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &timestamp) in timestamps.iter().enumerate() {
        let close = match closes.get(i).copied().flatten() {
            Some(c) if c.is_finite() && c > 0.0 => c,
            // Skip invalid data points
            _ => continue,
        };

        let date = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| {
                AppError::MalformedInput(format!("Timestamp out of range: {}", timestamp))
            })?
            .date_naive();

        points.push(PricePoint::new(date, close));
    }

    let series = HistoricalSeries::new(symbol, points);
    if series.is_empty() {
        return Err(AppError::DataUnavailable(format!(
            "No price data returned for {}",
            symbol
        )));
    }

    Ok(series)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| AppError::DataUnavailable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Chart endpoint for a symbol.
    pub fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.base_url,
            normalize_yahoo_symbol(symbol)
        )
    }

    /// Fetch daily closes for `symbol` from `start` up to, not including, `end`.
    pub async fn get_daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoricalSeries> {
        let url = self.chart_url(symbol);
        debug!("Fetching Yahoo Finance data: {} [{} .. {})", url, start, end);

        let response = self
            .client
            .get(&url)
            .query(&history_query(start, end))
            .send()
            .await
            .map_err(|e| AppError::DataUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::DataUnavailable(format!("Read failed: {}", e)))?;

        if !status.is_success() {
            // Unknown symbols come back as 404 with a chart.error payload.
            return match parse_chart_response(symbol, &body) {
                Err(err @ AppError::DataUnavailable(_)) => Err(err),
                _ => Err(AppError::DataUnavailable(format!("API error: {}", status))),
            };
        }

        let series = parse_chart_response(symbol, &body)?;
        info!(
            "Loaded {} daily closes for {} ({:?} .. {:?})",
            series.len(),
            symbol,
            series.first_date(),
            series.last_date()
        );
        Ok(series)
    }
}
