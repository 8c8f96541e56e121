//! JSON shapes returned by the chart endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A field declaration that the backend may send as a bare string or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldList {
    One(String),
    Many(Vec<String>),
}

impl FieldList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(field) => vec![field.clone()],
            Self::Many(fields) => fields.clone(),
        }
    }
}

impl Default for FieldList {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub chart_type: String,
    #[serde(default)]
    pub x_fields: FieldList,
    #[serde(default)]
    pub y_fields: FieldList,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

/// `"title": null` decodes like a missing title.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
    pub config: ChartConfig,
}

impl ChartResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_list_fields_both_decode() {
        let body = r#"{
            "columns": ["year", "quarter", "sales"],
            "rows": [{"year": 2023, "quarter": "Q1", "sales": "10"}],
            "config": {
                "chartType": "BarChart",
                "xFields": ["year", "quarter"],
                "yFields": "sales",
                "title": "Vendas"
            }
        }"#;

        let response = ChartResponse::from_json(body).unwrap();
        assert_eq!(response.config.chart_type, "BarChart");
        assert_eq!(response.config.x_fields.to_vec(), vec!["year", "quarter"]);
        assert_eq!(response.config.y_fields, FieldList::One("sales".into()));
        assert_eq!(response.config.y_fields.to_vec(), vec!["sales"]);
        assert_eq!(response.rows.len(), 1);
    }

    #[test]
    fn missing_title_defaults_to_empty() {
        let body = r#"{"rows": [], "config": {"chartType": "PieChart", "xFields": "a", "yFields": "b"}}"#;
        let response = ChartResponse::from_json(body).unwrap();
        assert!(response.config.title.is_empty());
        assert!(response.columns.is_empty());
    }

    #[test]
    fn null_title_decodes_as_empty() {
        let body = r#"{"rows": [{"a": "x", "b": 1}], "config": {"chartType": "ScatterChart", "xFields": "a", "yFields": "b", "title": null}}"#;
        let response = ChartResponse::from_json(body).unwrap();
        assert_eq!(response.config.title, "");
        assert_eq!(response.rows.len(), 1);
    }

    #[test]
    fn missing_config_is_a_decode_error() {
        assert!(ChartResponse::from_json(r#"{"rows": []}"#).is_err());
    }
}
