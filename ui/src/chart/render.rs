//! Chart-type dispatch and the cartesian renderers (bar, line, scatter, composed).

use std::collections::BTreeSet;

use api::ChartConfig;

use super::curve::monotone_path;
use super::data::ChartRow;
use super::polar;
use super::scale::{nice_ticks, BandScale, LinearScale};
use super::scene::{
    num, ChartScene, HoverTarget, LegendEntry, Mark, TextAnchor, TooltipEntry, PLOT_HEIGHT,
    PLOT_WIDTH,
};
use crate::core::format::{format_axis_tick, format_plain, format_tooltip_value};

pub const COLORS: [&str; 7] = [
    "#4F46E5", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#84CC16",
];

pub(super) const PLOT_LEFT: f64 = 80.0;
pub(super) const PLOT_RIGHT: f64 = PLOT_WIDTH - 30.0;
pub(super) const PLOT_TOP: f64 = 20.0;
pub(super) const PLOT_BOTTOM: f64 = PLOT_HEIGHT - 40.0;

const BAR_RADIUS: f64 = 6.0;
const BAR_GROUP_FILL: f64 = 0.8;
const BAR_GAP: f64 = 4.0;
const COMPOSED_BAR_SIZE: f64 = 20.0;
const SCATTER_RADIUS: f64 = 5.0;
const TICK_COUNT: usize = 4;

pub const SCATTER_SERIES_NAME: &str = "Dispersão";
pub const RADAR_SERIES_NAME: &str = "Radar";

pub fn color(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Radar,
    Composed,
}

impl ChartKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "BarChart" => Some(Self::Bar),
            "LineChart" => Some(Self::Line),
            "PieChart" => Some(Self::Pie),
            "ScatterChart" => Some(Self::Scatter),
            "RadarChart" => Some(Self::Radar),
            "ComposedChart" => Some(Self::Composed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedChart {
    Scene(ChartScene),
    /// Carries the chart type the backend asked for.
    Unsupported(String),
}

/// Lay out `rows` as the chart named by `config.chart_type`, skipping hidden series.
pub fn render(config: &ChartConfig, rows: &[ChartRow], hidden: &BTreeSet<String>) -> RenderedChart {
    let Some(kind) = ChartKind::parse(&config.chart_type) else {
        return RenderedChart::Unsupported(config.chart_type.clone());
    };

    let fields = config.y_fields.to_vec();
    let visible: Vec<String> = fields
        .iter()
        .filter(|field| !hidden.contains(*field))
        .cloned()
        .collect();

    let scene = match kind {
        ChartKind::Bar => bar_chart(rows, &visible, series_legend(&fields, hidden)),
        ChartKind::Line => line_chart(rows, &visible, series_legend(&fields, hidden)),
        ChartKind::Composed => composed_chart(rows, &visible, series_legend(&fields, hidden)),
        ChartKind::Scatter => scatter_chart(
            rows,
            visible.first(),
            named_series(&config.title, SCATTER_SERIES_NAME),
        ),
        ChartKind::Pie => polar::pie_chart(rows, visible.first()),
        ChartKind::Radar => polar::radar_chart(
            rows,
            visible.first(),
            named_series(&config.title, RADAR_SERIES_NAME),
        ),
    };
    RenderedChart::Scene(scene)
}

fn named_series(title: &str, fallback: &str) -> String {
    if title.is_empty() {
        fallback.to_string()
    } else {
        title.to_string()
    }
}

/// Every declared field stays listed; hidden ones are dimmed so they can be re-enabled.
fn series_legend(fields: &[String], hidden: &BTreeSet<String>) -> Vec<LegendEntry> {
    let mut visible_index = 0;
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let is_hidden = hidden.contains(field);
            let swatch = if is_hidden {
                color(index)
            } else {
                visible_index += 1;
                color(visible_index - 1)
            };
            LegendEntry {
                label: field.clone(),
                color: swatch.to_string(),
                toggle: Some(field.clone()),
                hidden: is_hidden,
            }
        })
        .collect()
}

struct CartesianFrame {
    band: BandScale,
    y: LinearScale,
}

fn cartesian_frame(
    rows: &[ChartRow],
    fields: &[String],
    grid: bool,
    tick_label: fn(f64) -> String,
    marks: &mut Vec<Mark>,
) -> CartesianFrame {
    let values = rows
        .iter()
        .flat_map(|row| fields.iter().map(move |field| row.number(field)));
    let ticks = nice_ticks(values, TICK_COUNT);
    let lo = ticks.first().copied().unwrap_or(0.0);
    let hi = ticks.last().copied().unwrap_or(1.0);

    let band = BandScale::new(rows.len(), PLOT_LEFT, PLOT_RIGHT);
    let y = LinearScale::new((lo, hi), (PLOT_BOTTOM, PLOT_TOP));

    for &tick in &ticks {
        let ty = y.map(tick);
        if grid {
            marks.push(Mark::grid_line(PLOT_LEFT, ty, PLOT_RIGHT, ty, true));
        }
        marks.push(Mark::text(PLOT_LEFT - 8.0, ty + 4.0, tick_label(tick), TextAnchor::End));
    }
    if grid {
        for index in 0..rows.len() {
            let cx = band.center(index);
            marks.push(Mark::grid_line(cx, PLOT_TOP, cx, PLOT_BOTTOM, true));
        }
    }

    marks.push(Mark::grid_line(PLOT_LEFT, PLOT_BOTTOM, PLOT_RIGHT, PLOT_BOTTOM, false));
    marks.push(Mark::grid_line(PLOT_LEFT, PLOT_TOP, PLOT_LEFT, PLOT_BOTTOM, false));
    for (index, row) in rows.iter().enumerate() {
        marks.push(Mark::text(
            band.center(index),
            PLOT_BOTTOM + 18.0,
            row.x_key(),
            TextAnchor::Middle,
        ));
    }

    CartesianFrame { band, y }
}

/// One hover column per category listing the finite values of `series`.
fn category_hover(
    rows: &[ChartRow],
    band: &BandScale,
    series: &[(String, String)],
) -> Vec<HoverTarget> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let x = band.band_start(index);
            let entries = series
                .iter()
                .filter_map(|(field, swatch)| {
                    let value = row.number(field);
                    value.is_finite().then(|| TooltipEntry {
                        name: field.clone(),
                        value: format_tooltip_value(value),
                        color: swatch.clone(),
                    })
                })
                .collect();
            HoverTarget {
                shape: rect_path(x, PLOT_TOP, band.bandwidth(), PLOT_BOTTOM - PLOT_TOP),
                anchor_x: band.center(index),
                anchor_y: PLOT_TOP,
                label: row.x_key().to_string(),
                entries,
            }
        })
        .collect()
}

fn colored(fields: &[String]) -> Vec<(String, String)> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| (field.clone(), color(index).to_string()))
        .collect()
}

fn bar_chart(rows: &[ChartRow], visible: &[String], legend: Vec<LegendEntry>) -> ChartScene {
    let mut marks = Vec::new();
    let frame = cartesian_frame(rows, visible, false, format_axis_tick, &mut marks);
    let zero = frame.y.map(0.0);

    let series_count = visible.len().max(1) as f64;
    let group = frame.band.bandwidth() * BAR_GROUP_FILL;
    let bar_width = ((group - BAR_GAP * (series_count - 1.0)) / series_count).max(1.0);

    for (row_index, row) in rows.iter().enumerate() {
        let group_start = frame.band.center(row_index) - group / 2.0;
        for (series_index, field) in visible.iter().enumerate() {
            let value = row.number(field);
            if !value.is_finite() {
                continue;
            }
            let top = frame.y.map(value);
            marks.push(Mark::Rect {
                x: group_start + series_index as f64 * (bar_width + BAR_GAP),
                y: top.min(zero),
                width: bar_width,
                height: (zero - top).abs(),
                radius: BAR_RADIUS,
                fill: color(series_index).to_string(),
                opacity: 1.0,
            });
        }
    }

    ChartScene {
        hover: category_hover(rows, &frame.band, &colored(visible)),
        marks,
        legend,
    }
}

fn line_series(
    rows: &[ChartRow],
    frame: &CartesianFrame,
    field: &str,
    stroke: &str,
    width: f64,
) -> Mark {
    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let value = row.number(field);
            let y = if value.is_finite() {
                frame.y.map(value)
            } else {
                f64::NAN
            };
            (frame.band.center(index), y)
        })
        .collect();

    Mark::Path {
        d: monotone_path(&points),
        stroke: Some(stroke.to_string()),
        stroke_width: width,
        fill: None,
        fill_opacity: 0.0,
    }
}

fn line_chart(rows: &[ChartRow], visible: &[String], legend: Vec<LegendEntry>) -> ChartScene {
    let mut marks = Vec::new();
    let frame = cartesian_frame(rows, visible, false, format_axis_tick, &mut marks);

    for (index, field) in visible.iter().enumerate() {
        marks.push(line_series(rows, &frame, field, color(index), 2.0));
    }

    ChartScene {
        hover: category_hover(rows, &frame.band, &colored(visible)),
        marks,
        legend,
    }
}

fn composed_chart(rows: &[ChartRow], visible: &[String], legend: Vec<LegendEntry>) -> ChartScene {
    let mut marks = Vec::new();
    let frame = cartesian_frame(rows, visible, true, format_axis_tick, &mut marks);
    let zero = frame.y.map(0.0);

    if let Some(bar_field) = visible.first() {
        let width = COMPOSED_BAR_SIZE.min(frame.band.bandwidth());
        for (index, row) in rows.iter().enumerate() {
            let value = row.number(bar_field);
            if !value.is_finite() {
                continue;
            }
            let top = frame.y.map(value);
            marks.push(Mark::Rect {
                x: frame.band.center(index) - width / 2.0,
                y: top.min(zero),
                width,
                height: (zero - top).abs(),
                radius: 0.0,
                fill: color(0).to_string(),
                opacity: 1.0,
            });
        }
    }

    for (index, field) in visible.iter().enumerate().skip(1) {
        marks.push(line_series(rows, &frame, field, color(index), 1.0));
    }

    ChartScene {
        hover: category_hover(rows, &frame.band, &colored(visible)),
        marks,
        legend,
    }
}

fn scatter_chart(rows: &[ChartRow], field: Option<&String>, series: String) -> ChartScene {
    let fields: Vec<String> = field.into_iter().cloned().collect();
    let mut marks = Vec::new();
    let frame = cartesian_frame(rows, &fields, true, format_plain, &mut marks);
    let mut hover = Vec::new();

    if let Some(field) = field {
        for (index, row) in rows.iter().enumerate() {
            let value = row.number(field);
            if !value.is_finite() {
                continue;
            }
            let cx = frame.band.center(index);
            let cy = frame.y.map(value);
            marks.push(Mark::Circle {
                cx,
                cy,
                r: SCATTER_RADIUS,
                fill: color(0).to_string(),
            });
            hover.push(HoverTarget {
                shape: rect_path(cx - 8.0, cy - 8.0, 16.0, 16.0),
                anchor_x: cx,
                anchor_y: cy,
                label: row.x_key().to_string(),
                entries: vec![TooltipEntry {
                    name: field.clone(),
                    value: format_tooltip_value(value),
                    color: color(0).to_string(),
                }],
            });
        }
    }

    ChartScene {
        marks,
        hover,
        legend: single_series_legend(field, series),
    }
}

pub(super) fn single_series_legend(field: Option<&String>, series: String) -> Vec<LegendEntry> {
    field
        .map(|_| LegendEntry {
            label: series,
            color: color(0).to_string(),
            toggle: None,
            hidden: false,
        })
        .into_iter()
        .collect()
}

pub(super) fn rect_path(x: f64, y: f64, width: f64, height: f64) -> String {
    format!(
        "M{},{}h{}v{}h{}Z",
        num(x),
        num(y),
        num(width),
        num(height),
        num(-width)
    )
}
