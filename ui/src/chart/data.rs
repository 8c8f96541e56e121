//! Row normalization: numeric coercion of the declared fields plus the composite x key.

use std::collections::BTreeMap;

use api::ChartConfig;
use serde_json::{Map, Value};

use crate::core::format::format_plain;

/// Synthetic category key injected into every transformed row.
pub const X_KEY_FIELD: &str = "__xKey__";
pub const X_KEY_SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Json(Value),
}

impl FieldValue {
    fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Null,
            Some(Value::Bool(b)) => Self::Bool(*b),
            Some(Value::Number(n)) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(other) => Self::Json(other.clone()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartRow {
    fields: BTreeMap<String, FieldValue>,
}

impl ChartRow {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Numeric value of `field`; `NaN` when absent or not numeric.
    pub fn number(&self, field: &str) -> f64 {
        self.get(field)
            .and_then(FieldValue::as_number)
            .unwrap_or(f64::NAN)
    }

    pub fn x_key(&self) -> &str {
        self.get(X_KEY_FIELD)
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Coerce declared x/y fields and attach the composite x key. Undeclared fields are dropped.
pub fn transform_rows(rows: &[Map<String, Value>], config: &ChartConfig) -> Vec<ChartRow> {
    let x_fields = config.x_fields.to_vec();
    let y_fields = config.y_fields.to_vec();

    rows.iter()
        .map(|row| {
            let mut fields = BTreeMap::new();

            for field in &x_fields {
                let raw = row.get(field);
                let n = js_number(raw);
                let value = if n.is_finite() {
                    FieldValue::Number(n)
                } else {
                    FieldValue::from_json(raw)
                };
                fields.insert(field.clone(), value);
            }

            for field in &y_fields {
                fields.insert(field.clone(), FieldValue::Number(js_number(row.get(field))));
            }

            let x_key = x_fields
                .iter()
                .map(|field| raw_text(row.get(field)))
                .collect::<Vec<_>>()
                .join(X_KEY_SEPARATOR);
            fields.insert(X_KEY_FIELD.to_string(), FieldValue::Text(x_key));

            ChartRow { fields }
        })
        .collect()
}

/// Numeric conversion with browser `Number()` semantics for JSON values.
pub fn js_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_numeric_text(s),
        Some(Value::Array(items)) => match items.as_slice() {
            [] => 0.0,
            [single] if !single.is_array() && !single.is_object() => {
                parse_numeric_text(&raw_text(Some(single)))
            }
            _ => f64::NAN,
        },
        Some(Value::Object(_)) => f64::NAN,
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust accepts spellings like "inf" and "nan" that browsers reject.
    let plain_decimal = trimmed
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'));
    if !plain_decimal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// String form of a raw cell as it appears inside the composite key.
fn raw_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (_, Some(u)) => u.to_string(),
            _ => format_plain(n.as_f64().unwrap_or(f64::NAN)),
        },
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| raw_text(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::FieldList;
    use serde_json::json;

    fn config(x: FieldList, y: FieldList) -> ChartConfig {
        ChartConfig {
            chart_type: "BarChart".into(),
            x_fields: x,
            y_fields: y,
            title: String::new(),
        }
    }

    fn rows(value: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn single_fields_coerce_y_and_keep_text_x() {
        let cfg = config(FieldList::One("region".into()), FieldList::One("sales".into()));
        let out = transform_rows(&rows(json!([{"region": "North", "sales": "120"}])), &cfg);

        assert_eq!(out.len(), 1);
        let row = &out[0];
        assert_eq!(row.get("region"), Some(&FieldValue::Text("North".into())));
        assert_eq!(row.get("sales"), Some(&FieldValue::Number(120.0)));
        assert_eq!(row.x_key(), "North");
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn multiple_x_fields_join_into_key() {
        let cfg = config(
            FieldList::Many(vec!["year".into(), "quarter".into()]),
            FieldList::One("sales".into()),
        );
        let out = transform_rows(
            &rows(json!([{"year": 2023, "quarter": "Q1", "sales": 10}])),
            &cfg,
        );
        assert_eq!(out[0].x_key(), "2023 - Q1");
        assert_eq!(out[0].get("year"), Some(&FieldValue::Number(2023.0)));
        assert_eq!(out[0].get("quarter"), Some(&FieldValue::Text("Q1".into())));
    }

    #[test]
    fn numeric_text_x_becomes_number_but_key_keeps_raw_text() {
        let cfg = config(FieldList::One("month".into()), FieldList::One("v".into()));
        let out = transform_rows(&rows(json!([{"month": "03", "v": 1}])), &cfg);
        assert_eq!(out[0].get("month"), Some(&FieldValue::Number(3.0)));
        assert_eq!(out[0].x_key(), "03");
    }

    #[test]
    fn non_numeric_y_becomes_nan() {
        let cfg = config(FieldList::One("r".into()), FieldList::Many(vec!["a".into(), "b".into()]));
        let out = transform_rows(&rows(json!([{"r": "x", "a": "n/a"}])), &cfg);
        assert!(out[0].number("a").is_nan());
        assert!(out[0].number("b").is_nan());
    }

    #[test]
    fn undeclared_fields_are_dropped() {
        let cfg = config(FieldList::One("r".into()), FieldList::One("v".into()));
        let out = transform_rows(&rows(json!([{"r": "x", "v": 2, "extra": true}])), &cfg);
        assert!(out[0].get("extra").is_none());
    }

    #[test]
    fn number_conversion_follows_browser_rules() {
        assert_eq!(js_number(Some(&json!(" 42 "))), 42.0);
        assert_eq!(js_number(Some(&json!(""))), 0.0);
        assert_eq!(js_number(Some(&json!(null))), 0.0);
        assert_eq!(js_number(Some(&json!(true))), 1.0);
        assert_eq!(js_number(Some(&json!("0x1F"))), 31.0);
        assert_eq!(js_number(Some(&json!("1e3"))), 1000.0);
        assert_eq!(js_number(Some(&json!([7]))), 7.0);
        assert!(js_number(Some(&json!("inf"))).is_nan());
        assert!(js_number(Some(&json!("12abc"))).is_nan());
        assert!(js_number(Some(&json!({"a": 1}))).is_nan());
        assert!(js_number(None).is_nan());
    }

    #[test]
    fn missing_x_value_leaves_empty_key_segment() {
        let cfg = config(
            FieldList::Many(vec!["a".into(), "b".into()]),
            FieldList::One("v".into()),
        );
        let out = transform_rows(&rows(json!([{"a": "x", "v": 1}])), &cfg);
        assert_eq!(out[0].x_key(), "x - ");
        assert_eq!(out[0].get("b"), Some(&FieldValue::Null));
    }
}
