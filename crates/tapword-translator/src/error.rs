use std::time::Duration;

/// Shown for any transport failure, whatever the underlying cause
pub const UNREACHABLE_MESSAGE: &str = "Cannot reach translation service";
pub const GENERIC_FAILURE_MESSAGE: &str = "Translation failed";
pub const TIMEOUT_MESSAGE: &str = "Translation timed out";

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// Request rejected locally, never sent
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} {status_text}")]
    Remote {
        status: u16,
        status_text: String,
        message: Option<String>,
    },

    /// Success status but the body failed validation
    #[error("Invalid response: {0:?}")]
    InvalidResponse(Option<String>),

    #[error("No response after {0:?}")]
    Timeout(Duration),
}

impl TranslateError {
    /// Text rendered in the popup for a failed request
    pub fn user_message(&self) -> String {
        match self {
            TranslateError::Validation(message) => message.clone(),
            TranslateError::Network(_) => UNREACHABLE_MESSAGE.to_string(),
            TranslateError::Remote {
                status_text,
                message,
                ..
            } => message
                .clone()
                .or_else(|| (!status_text.is_empty()).then(|| status_text.clone()))
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            TranslateError::InvalidResponse(message) => message
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            TranslateError::Timeout(_) => TIMEOUT_MESSAGE.to_string(),
        }
    }
}
