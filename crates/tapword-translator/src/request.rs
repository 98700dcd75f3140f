use serde::{Deserialize, Serialize};

use crate::error::TranslateError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }

    /// Local shape check; a request failing it is never dispatched
    pub fn validate(&self) -> Result<(), TranslateError> {
        if self.text.trim().is_empty() {
            return Err(TranslateError::Validation(
                "Nothing to translate: text is empty".to_string(),
            ));
        }

        for (field, code) in [
            ("source_lang", &self.source_lang),
            ("target_lang", &self.target_lang),
        ] {
            if !is_language_code(code) {
                return Err(TranslateError::Validation(format!(
                    "{field} must be a 2-letter code, got {code:?}"
                )));
            }
        }

        Ok(())
    }
}

fn is_language_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
}

impl TranslationResult {
    pub fn new(translated_text: impl Into<String>) -> Self {
        Self {
            translated_text: translated_text.into(),
            source_lang: None,
            target_lang: None,
        }
    }
}

/// Outcome of the flashcard add that may accompany a translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffectStatus {
    pub succeeded: bool,
    pub reference_id: Option<u64>,
    pub error_message: Option<String>,
}

impl SideEffectStatus {
    pub fn added(reference_id: Option<u64>) -> Self {
        Self {
            succeeded: true,
            reference_id,
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            reference_id: None,
            error_message: Some(message.into()),
        }
    }
}

/// A validated translation plus the optional side-effect outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    pub result: TranslationResult,
    pub side_effect: Option<SideEffectStatus>,
}
