/**
 * Projection Engine Tests
 *
 * Properties of the naive moving-average projection:
 * - Output length and contiguous calendar dates
 * - Constant series as a fixed point
 * - Self-referencing recurrence over synthetic points
 */

use chrono::{Duration, NaiveDate};
use pricecast::error::AppError;
use pricecast::services::{rolling_mean, Projector};
use pricecast::types::{HistoricalSeries, PricePoint};

fn series_from(start: NaiveDate, closes: &[f64]) -> HistoricalSeries {
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c))
        .collect();
    HistoricalSeries::new("BTC-USD", points)
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Deterministic, wiggly closes without pulling in a RNG.
fn wiggly(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 95_000.0 + ((i * 37) % 101) as f64 * 13.5 - ((i * 11) % 7) as f64 * 40.0)
        .collect()
}

#[test]
fn test_output_length_is_input_plus_horizon() {
    for window in [1, 3, 5, 20] {
        for horizon in [0, 1, 7, 14, 30] {
            for n in [window, window + 1, 50, 120] {
                let history = series_from(start(), &wiggly(n));
                let projected = Projector::new(window, horizon).project(&history).unwrap();
                assert_eq!(
                    projected.len(),
                    n + horizon,
                    "window={} horizon={} n={}",
                    window,
                    horizon,
                    n
                );
            }
        }
    }
}

#[test]
fn test_projected_dates_are_contiguous_days() {
    let history = series_from(start(), &wiggly(40));
    let last_real = history.last_date().unwrap();
    let projected = Projector::new(5, 14).project(&history).unwrap();

    for (step, point) in projected.projected().iter().enumerate() {
        assert_eq!(point.date, last_real + Duration::days(step as i64 + 1));
        assert!(point.synthetic);
    }
}

#[test]
fn test_dates_ignore_gaps_in_history() {
    // Weekday-only history still projects onto every calendar day.
    let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
    let points = vec![
        PricePoint::new(friday - Duration::days(4), 10.0),
        PricePoint::new(friday - Duration::days(3), 11.0),
        PricePoint::new(friday - Duration::days(2), 12.0),
        PricePoint::new(friday - Duration::days(1), 13.0),
        PricePoint::new(friday, 14.0),
    ];
    let history = HistoricalSeries::new("SPY", points);
    let projected = Projector::new(5, 3).project(&history).unwrap();

    let dates: Vec<_> = projected.projected().iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![
            friday + Duration::days(1),
            friday + Duration::days(2),
            friday + Duration::days(3)
        ]
    );
}

#[test]
fn test_constant_history_is_fixed_point() {
    let history = series_from(start(), &[42_000.0; 30]);
    let projected = Projector::new(5, 14).project(&history).unwrap();

    for point in projected.projected() {
        assert_eq!(point.close, 42_000.0);
        assert_eq!(point.sma, Some(42_000.0));
    }
}

#[test]
fn test_zero_horizon_is_identity() {
    let closes = wiggly(25);
    let history = series_from(start(), &closes);
    let projected = Projector::new(5, 0).project(&history).unwrap();

    let dates: Vec<_> = projected.points.iter().map(|p| p.date).collect();
    let out: Vec<_> = projected.points.iter().map(|p| p.close).collect();
    let expected_dates: Vec<_> = history.points().iter().map(|p| p.date).collect();
    assert_eq!(dates, expected_dates);
    assert_eq!(out, closes);
    assert!(projected.projected().is_empty());
}

#[test]
fn test_five_day_scenario() {
    let history = series_from(start(), &[100.0, 102.0, 98.0, 101.0, 99.0]);
    let projected = Projector::new(5, 2).project(&history).unwrap();
    let tail = projected.projected();

    assert_eq!(tail[0].date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
    assert_eq!(tail[0].close, 100.0);
    assert_eq!(tail[1].date, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
    assert_eq!(tail[1].close, 100.0);
}

#[test]
fn test_recurrence_matches_explicit_replay() {
    let window = 5;
    let horizon = 14;
    let closes = wiggly(60);
    let history = series_from(start(), &closes);
    let projected = Projector::new(window, horizon).project(&history).unwrap();

    // Replay the recurrence by hand: every step averages the last `window`
    // values of the growing series, synthetic ones included.
    let mut replay = closes.clone();
    for _ in 0..horizon {
        let n = replay.len();
        let mean = replay[n - window..].iter().sum::<f64>() / window as f64;
        replay.push(mean);
    }

    let out: Vec<_> = projected.points.iter().map(|p| p.close).collect();
    assert_eq!(out, replay);

    let sma: Vec<_> = projected.points.iter().map(|p| p.sma).collect();
    assert_eq!(sma, rolling_mean(&replay, window));
}

#[test]
fn test_projection_flattens() {
    // Strong uptrend: later projected steps move less than earlier ones.
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + 10.0 * i as f64).collect();
    let history = series_from(start(), &closes);
    let projected = Projector::new(5, 14).project(&history).unwrap();
    let tail: Vec<f64> = projected.projected().iter().map(|p| p.close).collect();

    let first_move = (tail[1] - tail[0]).abs();
    let last_move = (tail[13] - tail[12]).abs();
    assert!(last_move < first_move);
    // Never anchored back to the last real close.
    assert!(tail.iter().all(|&c| c < 290.0));
}

#[test]
fn test_insufficient_history() {
    let history = series_from(start(), &[1.0, 2.0, 3.0, 4.0]);
    let err = Projector::new(5, 14).project(&history).unwrap_err();

    assert!(matches!(
        err,
        AppError::InsufficientHistory {
            required: 5,
            available: 4
        }
    ));
}
