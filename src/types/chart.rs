use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Named trace colour; the renderer maps it onto its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesColor {
    White,
    Red,
    Blue,
    Green,
    Gray,
}

/// Line stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Solid,
    Dash,
}

/// Stroke style shared by traces and annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: SeriesColor,
    pub dash: LineDash,
    pub width: u8,
}

impl LineStyle {
    pub fn solid(color: SeriesColor) -> Self {
        Self {
            color,
            dash: LineDash::Solid,
            width: 1,
        }
    }

    pub fn dashed(color: SeriesColor) -> Self {
        Self {
            color,
            dash: LineDash::Dash,
            width: 1,
        }
    }
}

/// Plotted (date, price) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One named series on the chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub style: LineStyle,
    pub points: Vec<ChartPoint>,
}

impl Trace {
    /// Value plotted at `date`, if the trace has one.
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.date == date)
            .map(|p| p.value)
    }
}

/// Vertical line at a date spanning the full y extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateMarker {
    pub date: NaiveDate,
    pub style: LineStyle,
}

/// Value of one trace at a hovered date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverValue {
    pub name: String,
    pub color: SeriesColor,
    pub value: Option<f64>,
}

/// Every trace's value at one x position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedHover {
    pub date: NaiveDate,
    pub values: Vec<HoverValue>,
}

impl UnifiedHover {
    /// Header line, e.g. "Date: 2025-03-01".
    pub fn date_label(&self) -> String {
        format!("Date: {}", self.date.format("%Y-%m-%d"))
    }

    /// Price text, e.g. "Price: $100.00", or "Price: -" when the trace has no value.
    pub fn price_label(value: Option<f64>) -> String {
        match value {
            Some(v) => format!("Price: ${:.2}", v),
            None => "Price: -".to_string(),
        }
    }
}

/// Renderer-independent description of the dashboard chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
    pub today: DateMarker,
}

impl ChartSpec {
    /// Unified hover: every trace's value at `date`, in trace order.
    pub fn hover_at(&self, date: NaiveDate) -> UnifiedHover {
        UnifiedHover {
            date,
            values: self
                .traces
                .iter()
                .map(|t| HoverValue {
                    name: t.name.clone(),
                    color: t.style.color,
                    value: t.value_at(date),
                })
                .collect(),
        }
    }

    /// Earliest and latest x positions, including the today marker.
    pub fn x_bounds(&self) -> (NaiveDate, NaiveDate) {
        self.traces
            .iter()
            .flat_map(|t| t.points.iter().map(|p| p.date))
            .fold((self.today.date, self.today.date), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }

    /// Lowest and highest plotted value, `None` when nothing is plotted.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.traces
            .iter()
            .flat_map(|t| t.points.iter().map(|p| p.value))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }

    /// Distinct plotted dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(|p| p.date))
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }
}
