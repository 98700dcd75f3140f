//! Helpers shared by the HTTP contracts.

use reqwest::StatusCode;

use crate::error::TranslateError;

/// Most specific human-readable message in an error body, if any
pub fn extract_error_message(body: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;

    ["error", "message", "detail"].iter().find_map(|key| {
        json.get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Map a non-success status to a remote error
pub fn check_status(status: StatusCode, body: &[u8]) -> Result<(), TranslateError> {
    if status.is_success() {
        return Ok(());
    }

    Err(TranslateError::Remote {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        message: extract_error_message(body),
    })
}

/// Parse a success body, turning shape errors into `InvalidResponse`
pub fn parse_body<T>(body: &[u8]) -> Result<T, TranslateError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!("Response body rejected: {e}");
        TranslateError::InvalidResponse(extract_error_message(body))
    })
}

/// Required translated text: present and not blank
pub fn require_translation(
    translation: Option<String>,
    body: &[u8],
) -> Result<String, TranslateError> {
    match translation {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(TranslateError::InvalidResponse(extract_error_message(body))),
    }
}
