use std::collections::BTreeSet;

use api::{ApiError, ChartConfig, ChartResponse};

use super::data::{transform_rows, ChartRow};
use crate::core::request::{RequestSequence, RequestTicket};

pub const DEFAULT_EXPORT_NAME: &str = "grafico";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartState {
    pub query: String,
    pub loading: bool,
    pub data: Vec<ChartRow>,
    pub config: Option<ChartConfig>,
    pub error: Option<String>,
    hidden: BTreeSet<String>,
    requests: RequestSequence,
}

impl ChartState {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Start a search. Whitespace-only queries are ignored; others are sent as typed.
    /// The hidden set survives.
    pub fn begin_search(&mut self) -> Option<RequestTicket> {
        if self.query.trim().is_empty() {
            return None;
        }
        self.loading = true;
        self.data.clear();
        self.config = None;
        self.error = None;
        Some(self.requests.issue(self.query.clone()))
    }

    /// Apply a response. Returns `false` when `ticket` was superseded by a newer search.
    pub fn finish(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ChartResponse, ApiError>,
    ) -> bool {
        if !self.requests.is_current(&ticket) {
            tracing::debug!(seq = ticket.seq, "discarding stale chart response");
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(response) => {
                self.data = transform_rows(&response.rows, &response.config);
                tracing::debug!(
                    rows = self.data.len(),
                    chart_type = %response.config.chart_type,
                    "chart data loaded"
                );
                self.config = Some(response.config);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(prompt = %ticket.prompt, "chart query failed: {err}");
                self.data.clear();
                self.config = None;
                self.error = Some(err.user_message());
            }
        }
        true
    }

    pub fn toggle_key(&mut self, name: &str) {
        if !self.hidden.remove(name) {
            self.hidden.insert(name.to_string());
        }
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(name)
    }

    pub fn hidden(&self) -> &BTreeSet<String> {
        &self.hidden
    }

    /// Declared y-fields minus the hidden ones, in declaration order.
    pub fn visible_fields(&self) -> Vec<String> {
        self.config
            .as_ref()
            .map(|config| {
                config
                    .y_fields
                    .to_vec()
                    .into_iter()
                    .filter(|field| !self.is_hidden(field))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A response was applied, even one with no rows.
    pub fn has_result(&self) -> bool {
        self.config.is_some()
    }

    pub fn is_idle(&self) -> bool {
        !self.loading && self.config.is_none() && self.error.is_none()
    }

    pub fn export_filename(&self) -> String {
        let title = self
            .config
            .as_ref()
            .map(|config| config.title.as_str())
            .filter(|title| !title.is_empty())
            .unwrap_or(DEFAULT_EXPORT_NAME);
        format!("{title}.png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(chart_type: &str, title: &str) -> ChartResponse {
        ChartResponse::from_json(
            &json!({
                "columns": ["region", "sales", "cost"],
                "rows": [
                    {"region": "North", "sales": "120", "cost": 80},
                    {"region": "South", "sales": 95, "cost": "x"}
                ],
                "config": {
                    "chartType": chart_type,
                    "xFields": "region",
                    "yFields": ["sales", "cost"],
                    "title": title
                }
            })
            .to_string(),
        )
        .unwrap()
    }

    fn searching(query: &str) -> (ChartState, RequestTicket) {
        let mut state = ChartState::default();
        state.set_query(query);
        let ticket = state.begin_search().unwrap();
        (state, ticket)
    }

    #[test]
    fn whitespace_query_is_ignored() {
        let mut state = ChartState::default();
        state.set_query("   ");
        assert!(state.begin_search().is_none());
        assert!(!state.loading);
    }

    #[test]
    fn success_stores_transformed_rows_and_config() {
        let (mut state, ticket) = searching("  vendas ");
        assert_eq!(ticket.prompt, "  vendas ");
        assert!(state.loading);

        assert!(state.finish(ticket, Ok(response("BarChart", "Vendas"))));
        assert!(!state.loading);
        assert!(state.has_result());
        assert_eq!(state.data.len(), 2);
        assert_eq!(state.data[0].number("sales"), 120.0);
        assert!(state.data[1].number("cost").is_nan());
        assert_eq!(state.config.as_ref().unwrap().chart_type, "BarChart");
    }

    #[test]
    fn empty_rows_still_count_as_a_result() {
        let (mut state, ticket) = searching("mapa");
        let body = json!({
            "columns": [],
            "rows": [],
            "config": {"chartType": "Heatmap", "xFields": "region", "yFields": "sales", "title": "Mapa"}
        });
        let response = ChartResponse::from_json(&body.to_string()).unwrap();
        assert!(state.finish(ticket, Ok(response)));

        assert!(state.data.is_empty());
        assert!(state.has_result());
        assert!(!state.is_idle());
        let config = state.config.as_ref().unwrap();
        assert_eq!(
            crate::chart::render(config, &state.data, state.hidden()),
            crate::chart::RenderedChart::Unsupported("Heatmap".into())
        );
    }

    #[test]
    fn status_failure_sets_fetch_message() {
        let (mut state, ticket) = searching("vendas");
        state.finish(ticket, Err(ApiError::Status(503)));
        assert_eq!(
            state.error.as_deref(),
            Some("Falha ao consultar dados. Tente novamente")
        );
        assert!(state.config.is_none());
        assert!(!state.has_result());
    }

    #[test]
    fn decode_failure_surfaces_its_message() {
        let (mut state, ticket) = searching("vendas");
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        state.finish(ticket, Err(ApiError::Decode(err)));
        let message = state.error.unwrap();
        assert!(!message.is_empty());
        assert_ne!(message, "Falha ao consultar dados. Tente novamente");
    }

    #[test]
    fn toggling_twice_restores_hidden_set() {
        let mut state = ChartState::default();
        let before = state.hidden().clone();
        state.toggle_key("sales");
        assert!(state.is_hidden("sales"));
        state.toggle_key("sales");
        assert_eq!(state.hidden(), &before);
    }

    #[test]
    fn hidden_fields_survive_a_new_search() {
        let (mut state, ticket) = searching("vendas");
        state.finish(ticket, Ok(response("LineChart", "")));
        state.toggle_key("sales");
        assert_eq!(state.visible_fields(), vec!["cost".to_string()]);

        let ticket = state.begin_search().unwrap();
        state.finish(ticket, Ok(response("LineChart", "")));
        assert!(state.is_hidden("sales"));
        assert_eq!(state.visible_fields(), vec!["cost".to_string()]);
    }

    #[test]
    fn stale_chart_response_is_discarded() {
        let (mut state, first) = searching("a");
        state.set_query("b");
        let second = state.begin_search().unwrap();

        assert!(!state.finish(first, Ok(response("PieChart", "velho"))));
        assert!(state.config.is_none());
        assert!(state.finish(second, Ok(response("PieChart", "novo"))));
        assert_eq!(state.config.unwrap().title, "novo");
    }

    #[test]
    fn export_filename_prefers_title() {
        let (mut state, ticket) = searching("x");
        assert_eq!(state.export_filename(), "grafico.png");
        state.finish(ticket, Ok(response("BarChart", "Receita 2024")));
        assert_eq!(state.export_filename(), "Receita 2024.png");
    }
}
