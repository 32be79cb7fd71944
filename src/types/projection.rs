use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the projected series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub date: NaiveDate,
    /// Real close, or the step's moving average for synthetic rows.
    pub close: f64,
    /// Trailing mean of `close`; `None` until the window fills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma: Option<f64>,
    /// True for rows appended past the last real date.
    pub synthetic: bool,
}

/// History extended by the naive moving-average projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedSeries {
    pub window: usize,
    pub horizon: usize,
    pub points: Vec<ProjectedPoint>,
}

impl ProjectedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rows appended by the projection.
    pub fn projected(&self) -> &[ProjectedPoint] {
        let start = self.points.len().saturating_sub(self.horizon);
        &self.points[start..]
    }

    /// The most recent `n` rows (all of them when shorter).
    pub fn tail(&self, n: usize) -> &[ProjectedPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }
}
