//! Chart composition.
//!
//! Builds the layered chart: recent real closes, the head of each model
//! forecast, the projected SMA and a vertical marker at today's date.

use crate::types::{
    ChartPoint, ChartSpec, DateMarker, ForecastSeries, HistoricalSeries, LineDash, LineStyle,
    ProjectedSeries, SeriesColor, Trace,
};
use chrono::NaiveDate;

pub const REAL_PRICE_TRACE: &str = "Real Price";
pub const SMA_TRACE: &str = "SMA";

/// Colours assigned to forecast traces, in load order.
const FORECAST_COLORS: [SeriesColor; 2] = [SeriesColor::Red, SeriesColor::Blue];

/// Composes the dashboard chart from loaded and projected series.
#[derive(Debug, Clone)]
pub struct ChartComposer {
    title: String,
    display_points: usize,
    horizon: usize,
}

impl ChartComposer {
    pub fn new(title: impl Into<String>, display_points: usize, horizon: usize) -> Self {
        Self {
            title: title.into(),
            display_points,
            horizon,
        }
    }

    pub fn compose(
        &self,
        history: &HistoricalSeries,
        forecasts: &[ForecastSeries],
        projected: &ProjectedSeries,
        today: NaiveDate,
    ) -> ChartSpec {
        let mut traces = Vec::with_capacity(forecasts.len() + 2);

        traces.push(Trace {
            name: REAL_PRICE_TRACE.to_string(),
            style: LineStyle::solid(SeriesColor::White),
            points: history
                .tail(self.display_points)
                .iter()
                .map(|p| ChartPoint {
                    date: p.date,
                    value: p.close,
                })
                .collect(),
        });

        for (i, forecast) in forecasts.iter().enumerate() {
            traces.push(Trace {
                name: forecast.model.clone(),
                style: LineStyle::solid(FORECAST_COLORS[i % FORECAST_COLORS.len()]),
                points: forecast
                    .head(self.horizon)
                    .iter()
                    .map(|p| ChartPoint {
                        date: p.date,
                        value: p.predicted_price,
                    })
                    .collect(),
            });
        }

        traces.push(Trace {
            name: SMA_TRACE.to_string(),
            style: LineStyle::dashed(SeriesColor::Green),
            points: projected
                .tail(self.display_points + self.horizon)
                .iter()
                .filter_map(|p| p.sma.map(|value| ChartPoint { date: p.date, value }))
                .collect(),
        });

        ChartSpec {
            title: self.title.clone(),
            x_label: "Date".to_string(),
            y_label: "Price (USD)".to_string(),
            traces,
            today: DateMarker {
                date: today,
                style: LineStyle {
                    color: SeriesColor::Gray,
                    dash: LineDash::Dash,
                    width: 2,
                },
            },
        }
    }
}
