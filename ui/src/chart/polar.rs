//! Pie and radar layouts around the plot center.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::data::ChartRow;
use super::render::{color, single_series_legend};
use super::scale::{nice_ticks, LinearScale};
use super::scene::{
    num, ChartScene, HoverTarget, LegendEntry, Mark, TextAnchor, TooltipEntry, PLOT_HEIGHT,
    PLOT_WIDTH,
};
use crate::core::format::{format_grouped, format_tooltip_value, NumberLocale};

const CENTER: (f64, f64) = (PLOT_WIDTH / 2.0, PLOT_HEIGHT / 2.0);
const PIE_RADIUS: f64 = 120.0;
const RADAR_RADIUS: f64 = 160.0;
const RADAR_FILL_OPACITY: f64 = 0.6;

/// Point at `radius` and `angle` (radians, counter-clockwise from 3 o'clock).
fn polar_point(radius: f64, angle: f64) -> (f64, f64) {
    (CENTER.0 + radius * angle.cos(), CENTER.1 - radius * angle.sin())
}

fn anchor_for(angle: f64) -> TextAnchor {
    let cos = angle.cos();
    if cos > 0.1 {
        TextAnchor::Start
    } else if cos < -0.1 {
        TextAnchor::End
    } else {
        TextAnchor::Middle
    }
}

/// Slices sized by the first visible field, one per row, coloured by row index.
pub fn pie_chart(rows: &[ChartRow], field: Option<&String>) -> ChartScene {
    let mut scene = ChartScene::default();
    let Some(field) = field else {
        return scene;
    };

    let values: Vec<f64> = rows
        .iter()
        .map(|row| row.number(field))
        .map(|v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
        .collect();
    let total: f64 = values.iter().sum();

    let mut start = 0.0;
    for (index, (row, &value)) in rows.iter().zip(&values).enumerate() {
        let fill = color(index).to_string();
        scene.legend.push(LegendEntry {
            label: row.x_key().to_string(),
            color: fill.clone(),
            toggle: None,
            hidden: false,
        });
        if total <= 0.0 || value <= 0.0 {
            continue;
        }

        let sweep = value / total * TAU;
        let end = start + sweep;
        let wedge = wedge_path(PIE_RADIUS, start, end);
        let mid = start + sweep / 2.0;

        scene.marks.push(Mark::Path {
            d: wedge.clone(),
            stroke: Some("#ffffff".to_string()),
            stroke_width: 1.0,
            fill: Some(fill.clone()),
            fill_opacity: 1.0,
        });

        let (lx, ly) = polar_point(PIE_RADIUS + 16.0, mid);
        let mut label = Mark::text(
            lx,
            ly + 4.0,
            format_grouped(value, NumberLocale::EnUs),
            anchor_for(mid),
        );
        if let Mark::Text { fill: text_fill, .. } = &mut label {
            *text_fill = fill.clone();
        }
        scene.marks.push(label);

        let (ax, ay) = polar_point(PIE_RADIUS * 0.6, mid);
        scene.hover.push(HoverTarget {
            shape: wedge,
            anchor_x: ax,
            anchor_y: ay,
            label: row.x_key().to_string(),
            entries: vec![TooltipEntry {
                name: field.clone(),
                value: format_tooltip_value(value),
                color: fill,
            }],
        });

        start = end;
    }
    scene
}

fn wedge_path(radius: f64, start: f64, end: f64) -> String {
    let (cx, cy) = CENTER;
    if end - start >= TAU - 1e-9 {
        // A full turn cannot be drawn as one arc.
        let (x0, y0) = polar_point(radius, start);
        let (x1, y1) = polar_point(radius, start + TAU / 2.0);
        return format!(
            "M{x0},{y0}A{r},{r} 0 1 0 {x1},{y1}A{r},{r} 0 1 0 {x0},{y0}Z",
            x0 = num(x0),
            y0 = num(y0),
            x1 = num(x1),
            y1 = num(y1),
            r = num(radius)
        );
    }
    let (x0, y0) = polar_point(radius, start);
    let (x1, y1) = polar_point(radius, end);
    let large_arc = u8::from(end - start > TAU / 2.0);
    format!(
        "M{},{}L{},{}A{r},{r} 0 {large_arc} 0 {},{}Z",
        num(cx),
        num(cy),
        num(x0),
        num(y0),
        num(x1),
        num(y1),
        r = num(radius)
    )
}

/// Polar grid with one spoke per category and a filled polygon for the first visible field.
pub fn radar_chart(rows: &[ChartRow], field: Option<&String>, series: String) -> ChartScene {
    let mut scene = ChartScene {
        legend: single_series_legend(field, series.clone()),
        ..ChartScene::default()
    };
    if rows.is_empty() {
        return scene;
    }

    let values: Vec<f64> = match field {
        Some(field) => rows.iter().map(|row| row.number(field)).collect(),
        None => Vec::new(),
    };
    let ticks = nice_ticks(values.iter().copied(), 4);
    let hi = ticks.last().copied().unwrap_or(1.0);
    let radius = LinearScale::new((0.0, hi), (0.0, RADAR_RADIUS));

    let count = rows.len();
    let angle_of = |index: usize| FRAC_PI_2 - index as f64 * TAU / count as f64;

    for &tick in ticks.iter().filter(|&&t| t > 0.0) {
        let r = radius.map(tick);
        let ring: Vec<(f64, f64)> = (0..count).map(|i| polar_point(r, angle_of(i))).collect();
        scene.marks.push(Mark::Path {
            d: polygon_path(&ring),
            stroke: Some("#374151".to_string()),
            stroke_width: 1.0,
            fill: None,
            fill_opacity: 0.0,
        });
    }

    for (index, row) in rows.iter().enumerate() {
        let angle = angle_of(index);
        let (sx, sy) = polar_point(RADAR_RADIUS, angle);
        scene.marks.push(Mark::grid_line(CENTER.0, CENTER.1, sx, sy, false));
        let (lx, ly) = polar_point(RADAR_RADIUS + 14.0, angle);
        scene
            .marks
            .push(Mark::text(lx, ly + 4.0, row.x_key(), anchor_for(angle)));
    }

    if field.is_none() {
        return scene;
    }

    let outline: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let r = if value.is_finite() { radius.map(value).max(0.0) } else { 0.0 };
            polar_point(r, angle_of(index))
        })
        .collect();
    scene.marks.push(Mark::Path {
        d: polygon_path(&outline),
        stroke: Some(color(0).to_string()),
        stroke_width: 1.0,
        fill: Some(color(0).to_string()),
        fill_opacity: RADAR_FILL_OPACITY,
    });

    let half = TAU / count as f64 / 2.0;
    for (index, row) in rows.iter().enumerate() {
        let angle = angle_of(index);
        let value = values[index];
        let (ax, ay) = outline[index];
        let left = polar_point(RADAR_RADIUS, angle + half);
        let right = polar_point(RADAR_RADIUS, angle - half);
        scene.hover.push(HoverTarget {
            shape: polygon_path(&[CENTER, left, right]),
            anchor_x: ax,
            anchor_y: ay,
            label: row.x_key().to_string(),
            entries: value
                .is_finite()
                .then(|| TooltipEntry {
                    name: series.clone(),
                    value: format_tooltip_value(value),
                    color: color(0).to_string(),
                })
                .into_iter()
                .collect(),
        });
    }
    scene
}

fn polygon_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (index, (x, y)) in points.iter().enumerate() {
        d.push(if index == 0 { 'M' } else { 'L' });
        d.push_str(&format!("{},{}", num(*x), num(*y)));
    }
    d.push('Z');
    d
}
