//! Number formatting for chart axes and tooltips.

/// Grouping conventions the dashboard needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLocale {
    /// `1,234.5`
    EnUs,
    /// `1.234,5`
    PtBr,
}

impl NumberLocale {
    fn separators(self) -> (char, char) {
        match self {
            Self::EnUs => (',', '.'),
            Self::PtBr => ('.', ','),
        }
    }
}

/// Locale-grouped number with at most three fraction digits, trailing zeros dropped.
pub fn format_grouped(value: f64, locale: NumberLocale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        return format!("{sign}∞");
    }

    let (thousands, decimal) = locale.separators();
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, thousands));
    if !frac.is_empty() {
        out.push(decimal);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Y-axis ticks: millions collapse to `2.5M`, everything else is grouped.
pub fn format_axis_tick(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else {
        format_grouped(value, NumberLocale::EnUs)
    }
}

/// Tooltip values use Brazilian grouping regardless of UI language.
pub fn format_tooltip_value(value: f64) -> String {
    format_grouped(value, NumberLocale::PtBr)
}

/// Plain number text the way a browser stringifies it (`2023`, `1.5`, `NaN`).
pub fn format_plain(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}
