//! Endpoint configuration shared with every card through context.

use serde::{Deserialize, Serialize};

pub const DEFAULT_INSIGHT_URL: &str = "http://localhost:8000/insight";
pub const DEFAULT_CHART_URL: &str = "http://localhost:8000/chart";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub insight_url: String,
    pub chart_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            insight_url: DEFAULT_INSIGHT_URL.to_string(),
            chart_url: DEFAULT_CHART_URL.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Browser builds always talk to the default endpoints.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::default()
    }

    /// Desktop builds read `config.json` from the per-user config directory when present.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(raw) => match Self::from_json(&raw) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "loaded dashboard config");
                    config
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), "ignoring malformed config: {err}");
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), "unable to read config: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "IAnalytics", "IAnalytics Flow")
        .map(|dirs| dirs.config_dir().join("config.json"))
}
