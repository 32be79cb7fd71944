//! One dashboard pass: load, project, compose.

use crate::config::Config;
use crate::error::Result;
use crate::services::chart::ChartComposer;
use crate::services::loader::{DashboardData, DataLoader};
use crate::services::projection::Projector;
use crate::types::{ChartSpec, ProjectedSeries};
use chrono::NaiveDate;
use tracing::info;

pub struct Pipeline {
    config: Config,
    loader: DataLoader,
    projector: Projector,
    composer: ChartComposer,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let loader = DataLoader::new(&config)?;
        let projector = Projector::new(config.sma_window, config.horizon);
        let composer =
            ChartComposer::new(config.chart_title(), config.display_points, config.horizon);

        Ok(Self {
            config,
            loader,
            projector,
            composer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Project already loaded data and compose the chart.
    pub fn build(&self, data: &DashboardData, today: NaiveDate) -> Result<(ProjectedSeries, ChartSpec)> {
        let projected = self.projector.project(&data.history)?;
        let chart = self
            .composer
            .compose(&data.history, &data.forecasts, &projected, today);
        Ok((projected, chart))
    }

    /// Full pass from the data sources to a chart.
    pub async fn run(&self, today: NaiveDate) -> Result<ChartSpec> {
        let data = self.loader.load(&self.config, today).await?;
        let (projected, chart) = self.build(&data, today)?;

        if let Some(last) = projected.points.last() {
            info!(
                "{} SMA projection ends {} at {:.2}",
                self.config.symbol, last.date, last.close
            );
        }
        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::types::{ForecastPoint, ForecastSeries, HistoricalSeries, PricePoint};
    use chrono::Duration;

    fn data(real: usize) -> DashboardData {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let history = HistoricalSeries::new(
            "BTC-USD",
            (0..real)
                .map(|i| PricePoint::new(start + Duration::days(i as i64), 90_000.0))
                .collect(),
        );
        let forecast = |model: &str| {
            ForecastSeries::new(
                model,
                (0..14)
                    .map(|i| ForecastPoint {
                        date: start + Duration::days((real + i) as i64),
                        predicted_price: 91_000.0,
                    })
                    .collect(),
            )
        };
        DashboardData {
            history,
            forecasts: vec![forecast("LSTM+CNN"), forecast("XGBoost")],
        }
    }

    #[test]
    fn test_build_constant_history() {
        let pipeline = Pipeline::new(Config::default()).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let (projected, chart) = pipeline.build(&data(60), today).unwrap();

        assert_eq!(projected.len(), 74);
        assert!(projected.projected().iter().all(|p| p.close == 90_000.0));
        assert_eq!(chart.title, "BTC Price");
        assert_eq!(chart.traces.len(), 4);
        assert_eq!(chart.today.date, today);
    }

    #[test]
    fn test_build_short_history_fails() {
        let pipeline = Pipeline::new(Config::default()).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let err = pipeline.build(&data(3), today).unwrap_err();
        assert!(matches!(err, AppError::InsufficientHistory { .. }));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = Config::default();
        config.horizon = 0;
        assert!(Pipeline::new(config).is_err());
    }
}
