//! Precomputed model forecasts stored as CSV.
//!
//! Files carry at least `Date` and `Predicted_Price` columns; anything else
//! is ignored.

use crate::error::{AppError, Result};
use crate::types::{ForecastPoint, ForecastSeries};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ForecastRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Predicted_Price")]
    predicted_price: String,
}

/// Parse an ISO date, or a datetime truncated to its date.
pub fn parse_forecast_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Read a forecast from any CSV source, requiring at least `min_rows` rows.
pub fn read_forecast<R: Read>(model: &str, reader: R, min_rows: usize) -> Result<ForecastSeries> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut points = Vec::new();

    for (i, record) in csv_reader.deserialize::<ForecastRecord>().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = i + 2;

        let date = parse_forecast_date(&record.date).ok_or_else(|| {
            AppError::MalformedInput(format!(
                "{}: line {}: unparseable Date {:?}",
                model, line, record.date
            ))
        })?;

        let predicted_price = record
            .predicted_price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| {
                AppError::MalformedInput(format!(
                    "{}: line {}: invalid Predicted_Price {:?}",
                    model, line, record.predicted_price
                ))
            })?;

        points.push(ForecastPoint {
            date,
            predicted_price,
        });
    }

    if points.len() < min_rows {
        return Err(AppError::MalformedInput(format!(
            "{}: forecast has {} rows, need at least {}",
            model,
            points.len(),
            min_rows
        )));
    }

    points.sort_by_key(|p| p.date);
    Ok(ForecastSeries::new(model, points))
}

/// Load a forecast file from disk.
pub fn load_forecast(model: &str, path: &Path, min_rows: usize) -> Result<ForecastSeries> {
    let file = std::fs::File::open(path).map_err(|e| {
        AppError::DataUnavailable(format!("{}: cannot open {}: {}", model, path.display(), e))
    })?;

    let series = read_forecast(model, file, min_rows)?;
    info!(
        "Loaded {} {} forecast rows from {}",
        series.len(),
        model,
        path.display()
    );
    Ok(series)
}
