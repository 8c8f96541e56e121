use tracing::{debug, warn};

use crate::error::ApiError;
use crate::wire::ChartResponse;

/// Build `{base_url}?prompt={encoded}`.
///
/// Close to `encodeURIComponent`, but stricter: everything outside
/// `A-Z a-z 0-9 - _ . ~` is escaped, including `!'()*`. Servers decode both the same.
pub fn prompt_url(base_url: &str, prompt: &str) -> String {
    format!("{base_url}?prompt={}", urlencoding::encode(prompt))
}

/// Thin GET client bound to one backend endpoint.
#[derive(Debug, Clone)]
pub struct QueryClient {
    http: reqwest::Client,
    base_url: String,
}

impl QueryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a plain-text (markdown) answer.
    pub async fn fetch_text(&self, prompt: &str) -> Result<String, ApiError> {
        let response = self.get(prompt).await?;
        Ok(response.text().await?)
    }

    /// Fetch and decode a chart payload.
    pub async fn fetch_chart(&self, prompt: &str) -> Result<ChartResponse, ApiError> {
        let response = self.get(prompt).await?;
        let body = response.text().await?;
        let chart = ChartResponse::from_json(&body)?;
        debug!(
            rows = chart.rows.len(),
            chart_type = %chart.config.chart_type,
            "chart payload decoded"
        );
        Ok(chart)
    }

    async fn get(&self, prompt: &str) -> Result<reqwest::Response, ApiError> {
        let url = prompt_url(&self.base_url, prompt);
        debug!(%url, "querying backend");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "backend answered with an error status");
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response)
    }
}
