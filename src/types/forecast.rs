use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One externally predicted price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_price: f64,
}

/// Forecast produced by an external model, loaded verbatim and ordered by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub model: String,
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(model: impl Into<String>, points: Vec<ForecastPoint>) -> Self {
        Self {
            model: model.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first `n` rows from the earliest date.
    pub fn head(&self, n: usize) -> &[ForecastPoint] {
        &self.points[..n.min(self.points.len())]
    }
}
