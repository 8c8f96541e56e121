//! Insight cards: free-text query in, markdown answer out.

mod view;
pub use view::InsightCard;

use api::{ApiError, FETCH_FAILED_MESSAGE};

use crate::core::export::ExportFile;
use crate::core::request::{RequestSequence, RequestTicket};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightState {
    pub query: String,
    pub loading: bool,
    pub result: Option<String>,
    pub error: Option<String>,
    requests: RequestSequence,
}

impl InsightState {
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Start a search for the current query. Empty queries are ignored.
    pub fn begin_search(&mut self) -> Option<RequestTicket> {
        if self.query.is_empty() {
            return None;
        }
        self.loading = true;
        self.result = None;
        self.error = None;
        Some(self.requests.issue(self.query.clone()))
    }

    /// Apply a response. Returns `false` when `ticket` was superseded by a newer search.
    pub fn finish(&mut self, ticket: RequestTicket, outcome: Result<String, ApiError>) -> bool {
        if !self.requests.is_current(&ticket) {
            tracing::debug!(seq = ticket.seq, "discarding stale insight response");
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(text) => {
                self.result = Some(unescape_newlines(&text));
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(prompt = %ticket.prompt, "insight query failed: {err}");
                self.result = None;
                self.error = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    pub fn has_result(&self) -> bool {
        self.result.as_deref().is_some_and(|text| !text.is_empty())
    }

    pub fn is_idle(&self) -> bool {
        !self.loading && !self.has_result() && self.error.is_none()
    }

    /// Text export of the current answer, if any.
    pub fn export_file(&self) -> Option<ExportFile> {
        let result = self.result.as_deref().filter(|text| !text.is_empty())?;
        Some(ExportFile::text(export_filename(&self.query), result))
    }
}

/// The backend escapes newlines; turn literal `\n` sequences back into line breaks.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// `insight_<query with whitespace runs as underscores>.txt`, or `insight_resultado.txt`.
pub fn export_filename(query: &str) -> String {
    let mut slug = String::with_capacity(query.len());
    let mut in_whitespace = false;
    for ch in query.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('_');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    if slug.is_empty() {
        slug.push_str("resultado");
    }
    format!("insight_{slug}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_query(query: &str) -> InsightState {
        let mut state = InsightState::default();
        state.set_query(query);
        state
    }

    #[test]
    fn empty_query_is_ignored() {
        let mut state = InsightState::default();
        assert!(state.begin_search().is_none());
        assert_eq!(state, InsightState::default());
    }

    #[test]
    fn failure_then_success_replaces_error() {
        let mut state = state_with_query("vendas por região");

        let ticket = state.begin_search().unwrap();
        assert!(state.loading);
        assert!(state.finish(ticket, Err(ApiError::Status(500))));
        assert_eq!(state.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(state.result.is_none());
        assert!(!state.loading);

        let ticket = state.begin_search().unwrap();
        assert!(state.error.is_none());
        assert!(state.finish(ticket, Ok("# Resumo\\nTudo certo".to_string())));
        assert!(state.error.is_none());
        assert_eq!(state.result.as_deref(), Some("# Resumo\nTudo certo"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = state_with_query("primeira");
        let first = state.begin_search().unwrap();
        state.set_query("segunda");
        let second = state.begin_search().unwrap();

        assert!(!state.finish(first, Ok("antiga".to_string())));
        assert!(state.loading);
        assert!(state.result.is_none());

        assert!(state.finish(second, Ok("nova".to_string())));
        assert!(!state.loading);
        assert_eq!(state.result.as_deref(), Some("nova"));
    }

    #[test]
    fn export_uses_query_slug_and_unescaped_text() {
        let mut state = state_with_query("vendas  por\tmês");
        let ticket = state.begin_search().unwrap();
        state.finish(ticket, Ok("linha 1\\nlinha 2".to_string()));

        let file = state.export_file().unwrap();
        assert_eq!(file.filename, "insight_vendas_por_mês.txt");
        assert_eq!(file.bytes, b"linha 1\nlinha 2");
    }

    #[test]
    fn export_requires_a_result() {
        let state = state_with_query("nada");
        assert!(state.export_file().is_none());
        assert!(state.is_idle());
    }

    #[test]
    fn empty_query_slug_falls_back() {
        assert_eq!(export_filename(""), "insight_resultado.txt");
        assert_eq!(export_filename(" a b "), "insight__a_b_.txt");
    }
}
