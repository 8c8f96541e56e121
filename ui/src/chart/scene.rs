//! Renderer-neutral chart geometry. A scene is a flat list of marks in an
//! 800x400 plot box plus hover regions and legend entries.

use std::fmt::Write as _;

pub const PLOT_WIDTH: f64 = 800.0;
pub const PLOT_HEIGHT: f64 = 400.0;

const TITLE_BAND: f64 = 48.0;
const LEGEND_BAND: f64 = 36.0;
const DOCUMENT_BACKGROUND: &str = "#1f2937";
const DOCUMENT_TEXT: &str = "#f9fafb";
const FONT_FAMILY: &str = "Inter, Segoe UI, sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        fill: String,
        opacity: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        width: f64,
        dashed: bool,
    },
    Path {
        d: String,
        stroke: Option<String>,
        stroke_width: f64,
        fill: Option<String>,
        fill_opacity: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: TextAnchor,
        fill: String,
        size: f64,
    },
}

impl Mark {
    pub fn text(x: f64, y: f64, text: impl Into<String>, anchor: TextAnchor) -> Self {
        Self::Text {
            x,
            y,
            text: text.into(),
            anchor,
            fill: "#9ca3af".to_string(),
            size: 12.0,
        }
    }

    pub fn grid_line(x1: f64, y1: f64, x2: f64, y2: f64, dashed: bool) -> Self {
        Self::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: "#374151".to_string(),
            width: 1.0,
            dashed,
        }
    }

    fn write_svg(&self, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match self {
            Self::Rect {
                x,
                y,
                width,
                height,
                radius,
                fill,
                opacity,
            } => writeln!(
                out,
                "<path d=\"{}\" fill=\"{fill}\" fill-opacity=\"{}\"/>",
                rounded_top_rect(*x, *y, *width, *height, *radius),
                num(*opacity)
            ),
            Self::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                width,
                dashed,
            } => writeln!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{stroke}\" stroke-width=\"{}\"{}/>",
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2),
                num(*width),
                if *dashed { " stroke-dasharray=\"3 3\"" } else { "" }
            ),
            Self::Path {
                d,
                stroke,
                stroke_width,
                fill,
                fill_opacity,
            } => writeln!(
                out,
                "<path d=\"{d}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"/>",
                fill.as_deref().unwrap_or("none"),
                num(*fill_opacity),
                stroke.as_deref().unwrap_or("none"),
                num(*stroke_width)
            ),
            Self::Circle { cx, cy, r, fill } => writeln!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\"/>",
                num(*cx),
                num(*cy),
                num(*r)
            ),
            Self::Text {
                x,
                y,
                text,
                anchor,
                fill,
                size,
            } => writeln!(
                out,
                "<text x=\"{}\" y=\"{}\" fill=\"{fill}\" font-size=\"{}\" font-family=\"{FONT_FAMILY}\" text-anchor=\"{}\">{}</text>",
                num(*x),
                num(*y),
                num(*size),
                anchor.as_str(),
                escape_xml(text)
            ),
        };
    }
}

/// One series line in a tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub name: String,
    pub value: String,
    pub color: String,
}

/// A hoverable region of the plot and the tooltip it reveals.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTarget {
    /// SVG path outlining the region in plot coordinates.
    pub shape: String,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub label: String,
    pub entries: Vec<TooltipEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    /// Series key toggled when the entry is clicked; `None` for static entries.
    pub toggle: Option<String>,
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartScene {
    pub marks: Vec<Mark>,
    pub hover: Vec<HoverTarget>,
    pub legend: Vec<LegendEntry>,
}

impl ChartScene {
    /// Plot marks as a bare `<svg>` element for inline display.
    pub fn to_svg_fragment(&self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"chart-plot\" viewBox=\"0 0 {w} {h}\" preserveAspectRatio=\"xMidYMid meet\">\n",
            w = num(PLOT_WIDTH),
            h = num(PLOT_HEIGHT)
        );
        for mark in &self.marks {
            mark.write_svg(&mut out);
        }
        out.push_str("</svg>");
        out
    }

    /// Standalone document with a title band above and the legend below the plot.
    pub fn to_svg_document(&self, title: &str) -> String {
        let height = document_height();
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n<rect width=\"{w}\" height=\"{h}\" fill=\"{DOCUMENT_BACKGROUND}\"/>\n",
            w = num(PLOT_WIDTH),
            h = num(height)
        );

        if !title.is_empty() {
            let _ = writeln!(
                out,
                "<text x=\"{}\" y=\"30\" fill=\"{DOCUMENT_TEXT}\" font-size=\"18\" font-weight=\"600\" font-family=\"{FONT_FAMILY}\" text-anchor=\"middle\">{}</text>",
                num(PLOT_WIDTH / 2.0),
                escape_xml(title)
            );
        }

        let _ = writeln!(out, "<g transform=\"translate(0,{})\">", num(TITLE_BAND));
        for mark in &self.marks {
            mark.write_svg(&mut out);
        }
        out.push_str("</g>\n");

        let legend_y = TITLE_BAND + PLOT_HEIGHT + LEGEND_BAND / 2.0;
        let mut x = (PLOT_WIDTH - legend_width(&self.legend)) / 2.0;
        for entry in &self.legend {
            let opacity = if entry.hidden { "0.35" } else { "1" };
            let _ = writeln!(
                out,
                "<g opacity=\"{opacity}\"><rect x=\"{}\" y=\"{}\" width=\"12\" height=\"12\" rx=\"2\" fill=\"{}\"/><text x=\"{}\" y=\"{}\" fill=\"{DOCUMENT_TEXT}\" font-size=\"12\" font-family=\"{FONT_FAMILY}\">{}</text></g>",
                num(x),
                num(legend_y - 6.0),
                entry.color,
                num(x + 18.0),
                num(legend_y + 4.0),
                escape_xml(&entry.label)
            );
            x += legend_entry_width(entry);
        }

        out.push_str("</svg>");
        out
    }
}

pub fn document_height() -> f64 {
    TITLE_BAND + PLOT_HEIGHT + LEGEND_BAND
}

fn legend_entry_width(entry: &LegendEntry) -> f64 {
    18.0 + entry.label.chars().count() as f64 * 7.0 + 20.0
}

fn legend_width(entries: &[LegendEntry]) -> f64 {
    entries.iter().map(legend_entry_width).sum()
}

/// Bar outline with rounded top corners only.
fn rounded_top_rect(x: f64, y: f64, width: f64, height: f64, radius: f64) -> String {
    let r = radius.min(width / 2.0).min(height.abs()).max(0.0);
    if r == 0.0 {
        return format!(
            "M{},{}h{}v{}h{}Z",
            num(x),
            num(y),
            num(width),
            num(height),
            num(-width)
        );
    }
    format!(
        "M{x0},{yb}V{yr}Q{x0},{y0} {xr},{y0}H{xe}Q{x1},{y0} {x1},{yr}V{yb}Z",
        x0 = num(x),
        x1 = num(x + width),
        y0 = num(y),
        yr = num(y + r),
        yb = num(y + height),
        xr = num(x + r),
        xe = num(x + width - r),
    )
}

/// Compact coordinate text: two decimals at most, no trailing zeros.
pub fn num(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
