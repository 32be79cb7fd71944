//! Naive moving-average projection.
//!
//! Extends a close-price history forward one calendar day at a time. Each
//! appended close is the trailing simple moving average of the series so far,
//! synthetic rows included, so later steps average over earlier projections.

use crate::error::{AppError, Result};
use crate::types::{HistoricalSeries, ProjectedPoint, ProjectedSeries};
use chrono::Duration;
use tracing::debug;

/// Trailing mean over `window` values; `None` before index `window - 1`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let sum: f64 = values[i + 1 - window..=i].iter().sum();
                Some(sum / window as f64)
            }
        })
        .collect()
}

/// Moving-average projection engine.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    window: usize,
    horizon: usize,
}

impl Projector {
    pub fn new(window: usize, horizon: usize) -> Self {
        Self { window, horizon }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Project `history` forward by the configured horizon.
    pub fn project(&self, history: &HistoricalSeries) -> Result<ProjectedSeries> {
        if self.window == 0 {
            return Err(AppError::MalformedInput(
                "SMA window must be at least 1".into(),
            ));
        }

        let mut dates: Vec<_> = history.points().iter().map(|p| p.date).collect();
        let mut closes = history.closes();

        if self.horizon > 0 {
            let last_date = history
                .last_date()
                .ok_or(AppError::InsufficientHistory {
                    required: self.window,
                    available: 0,
                })?;

            for step in 0..self.horizon {
                // Offset from the last real date, not from the growing series.
                let next_date = last_date + Duration::days(step as i64 + 1);

                let last_sma = rolling_mean(&closes, self.window)
                    .into_iter()
                    .rev()
                    .flatten()
                    .next()
                    .ok_or(AppError::InsufficientHistory {
                        required: self.window,
                        available: history.len(),
                    })?;

                dates.push(next_date);
                closes.push(last_sma);
            }

            debug!(
                "Projected {} {} days from {} (window {})",
                history.symbol(),
                self.horizon,
                last_date,
                self.window
            );
        }

        let sma = rolling_mean(&closes, self.window);
        let real = history.len();
        let points = dates
            .into_iter()
            .zip(closes)
            .zip(sma)
            .enumerate()
            .map(|(i, ((date, close), sma))| ProjectedPoint {
                date,
                close,
                sma,
                synthetic: i >= real,
            })
            .collect();

        Ok(ProjectedSeries {
            window: self.window,
            horizon: self.horizon,
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PricePoint;
    use chrono::NaiveDate;

    fn history(closes: &[f64]) -> HistoricalSeries {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c))
            .collect();
        HistoricalSeries::new("BTC-USD", points)
    }

    // =========================================================================
    // rolling_mean Tests
    // =========================================================================

    #[test]
    fn test_rolling_mean_leading_gaps() {
        let sma = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_rolling_mean_window_one_is_identity() {
        let sma = rolling_mean(&[5.0, 7.0], 1);
        assert_eq!(sma, vec![Some(5.0), Some(7.0)]);
    }

    #[test]
    fn test_rolling_mean_window_longer_than_input() {
        assert_eq!(rolling_mean(&[1.0, 2.0], 5), vec![None, None]);
        assert!(rolling_mean(&[], 5).is_empty());
    }

    // =========================================================================
    // Projector Tests
    // =========================================================================

    #[test]
    fn test_first_two_steps_scenario() {
        let projected = Projector::new(5, 2)
            .project(&history(&[100.0, 102.0, 98.0, 101.0, 99.0]))
            .unwrap();

        assert_eq!(projected.len(), 7);
        let tail = projected.projected();
        assert_eq!(tail[0].date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(tail[0].close, 100.0);
        assert_eq!(tail[1].date, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        assert_eq!(tail[1].close, 100.0);
        assert!(tail.iter().all(|p| p.synthetic));
    }

    #[test]
    fn test_projection_feeds_on_synthetic_points() {
        // Step 1: mean(1..=5) = 3. Step 2: mean(2, 3, 4, 5, 3) = 3.4.
        let projected = Projector::new(5, 2)
            .project(&history(&[1.0, 2.0, 3.0, 4.0, 5.0]))
            .unwrap();

        let tail = projected.projected();
        assert_eq!(tail[0].close, 3.0);
        assert!((tail[1].close - 3.4).abs() < 1e-12);
        // The SMA column on the last row averages both synthetic closes.
        let last_sma = tail[1].sma.unwrap();
        assert!((last_sma - 3.68).abs() < 1e-12);
    }

    #[test]
    fn test_sma_column_on_real_rows_uses_real_closes() {
        let projected = Projector::new(3, 1)
            .project(&history(&[3.0, 6.0, 9.0, 12.0]))
            .unwrap();

        let sma: Vec<_> = projected.points.iter().map(|p| p.sma).collect();
        assert_eq!(sma[..4], [None, None, Some(6.0), Some(9.0)]);
        assert!(!projected.points[3].synthetic);
    }

    #[test]
    fn test_zero_horizon_returns_history() {
        let input = history(&[10.0, 11.0, 12.0]);
        let projected = Projector::new(5, 0).project(&input).unwrap();

        assert_eq!(projected.len(), 3);
        for (p, h) in projected.points.iter().zip(input.points()) {
            assert_eq!(p.date, h.date);
            assert_eq!(p.close, h.close);
            assert!(!p.synthetic);
        }
    }

    #[test]
    fn test_short_history_is_insufficient() {
        let err = Projector::new(5, 14)
            .project(&history(&[1.0, 2.0, 3.0]))
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InsufficientHistory {
                required: 5,
                available: 3
            }
        ));
    }

    #[test]
    fn test_empty_history_is_insufficient() {
        let err = Projector::new(5, 1).project(&history(&[])).unwrap_err();
        assert!(matches!(err, AppError::InsufficientHistory { .. }));
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = Projector::new(0, 1)
            .project(&history(&[1.0]))
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
    }
}
