use thiserror::Error;

/// Generic message shown when the backend answers with a non-2xx status.
pub const FETCH_FAILED_MESSAGE: &str = "Falha ao consultar dados. Tente novamente";

/// Shown when a failure carries no message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erro desconhecido";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Falha ao consultar dados. Tente novamente")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Text suitable for the card's error line.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}
