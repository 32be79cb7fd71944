//! Chart view - price traces, today marker and unified hover panel.

use crate::types::{ChartSpec, LineDash, LineStyle, UnifiedHover};
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::Theme;

/// Points sampled along a vertical marker.
const MARKER_SAMPLES: usize = 48;

/// X coordinate of `date`: whole days after `origin`.
pub fn x_of(date: NaiveDate, origin: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}

/// Y range with a small margin so lines do not sit on the border.
pub fn padded_y_bounds(chart: &ChartSpec) -> [f64; 2] {
    match chart.y_bounds() {
        Some((lo, hi)) if hi > lo => {
            let pad = (hi - lo) * 0.05;
            [lo - pad, hi + pad]
        }
        Some((v, _)) => [v - 1.0, v + 1.0],
        None => [0.0, 1.0],
    }
}

/// Vertical line at `x` covering `y`; dashed markers get spaced samples.
pub fn vertical_line(x: f64, y: [f64; 2], dash: LineDash) -> Vec<(f64, f64)> {
    match dash {
        LineDash::Solid => vec![(x, y[0]), (x, y[1])],
        LineDash::Dash => {
            let step = (y[1] - y[0]) / MARKER_SAMPLES as f64;
            (0..=MARKER_SAMPLES)
                .map(|i| (x, y[0] + step * i as f64))
                .collect()
        }
    }
}

fn dataset_shape(style: &LineStyle) -> (symbols::Marker, GraphType) {
    match style.dash {
        LineDash::Solid => (symbols::Marker::Braille, GraphType::Line),
        // Scattered dots read as a dashed stroke on a character grid.
        LineDash::Dash => (symbols::Marker::Dot, GraphType::Scatter),
    }
}

/// Render the chart with the cursor line at `cursor`.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    chart: &ChartSpec,
    cursor: NaiveDate,
    theme: &Theme,
) {
    let (x_lo, x_hi) = chart.x_bounds();
    let x_bounds = [0.0, x_of(x_hi, x_lo).max(1.0)];
    let y_bounds = padded_y_bounds(chart);

    let trace_data: Vec<Vec<(f64, f64)>> = chart
        .traces
        .iter()
        .map(|t| {
            t.points
                .iter()
                .map(|p| (x_of(p.date, x_lo), p.value))
                .collect()
        })
        .collect();
    let today_data = vertical_line(x_of(chart.today.date, x_lo), y_bounds, chart.today.style.dash);
    let cursor_data = vertical_line(x_of(cursor, x_lo), y_bounds, LineDash::Solid);

    let mut datasets: Vec<Dataset> = chart
        .traces
        .iter()
        .zip(&trace_data)
        .map(|(trace, data)| {
            let (marker, graph_type) = dataset_shape(&trace.style);
            Dataset::default()
                .name(trace.name.clone())
                .marker(marker)
                .graph_type(graph_type)
                .style(Style::default().fg(theme.series(trace.style.color)))
                .data(data)
        })
        .collect();

    let (marker, graph_type) = dataset_shape(&chart.today.style);
    datasets.push(
        Dataset::default()
            .name("Today")
            .marker(marker)
            .graph_type(graph_type)
            .style(Style::default().fg(theme.series(chart.today.style.color)))
            .data(&today_data),
    );
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.cursor())
            .data(&cursor_data),
    );

    let x_mid = x_lo + chrono::Duration::days((x_bounds[1] / 2.0) as i64);
    let x_labels = vec![
        Span::styled(x_lo.format("%Y-%m-%d").to_string(), theme.muted()),
        Span::styled(x_mid.format("%Y-%m-%d").to_string(), theme.muted()),
        Span::styled(x_hi.format("%Y-%m-%d").to_string(), theme.muted()),
    ];
    let y_labels = vec![
        Span::styled(format!("{:.0}", y_bounds[0]), theme.muted()),
        Span::styled(
            format!("{:.0}", (y_bounds[0] + y_bounds[1]) / 2.0),
            theme.muted(),
        ),
        Span::styled(format!("{:.0}", y_bounds[1]), theme.muted()),
    ];

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(chart.title.clone(), theme.title()))
                .border_style(theme.border()),
        )
        .x_axis(
            Axis::default()
                .title(chart.x_label.clone())
                .style(theme.muted())
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_label.clone())
                .style(theme.muted())
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(widget, area);
}

/// Render every series value at the cursor date.
pub fn render_hover(frame: &mut Frame, area: Rect, hover: &UnifiedHover, theme: &Theme) {
    let mut lines = vec![Line::from(Span::styled(hover.date_label(), theme.header()))];
    for value in &hover.values {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(theme.series(value.color))),
            Span::raw(format!("{:<12}", value.name)),
            Span::styled(
                UnifiedHover::price_label(value.value),
                if value.value.is_some() {
                    Style::default()
                } else {
                    theme.muted()
                },
            ),
        ]));
    }

    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Hover")
            .border_style(theme.border()),
    );

    frame.render_widget(block, area);
}
