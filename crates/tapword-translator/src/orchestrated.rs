use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::request::{SideEffectStatus, Translated, TranslationRequest, TranslationResult};
use crate::response::{check_status, parse_body, require_translation};
use crate::{ProviderMetadata, Translator};

const ANKI_ADDED: &str = "added";
const FLASHCARD_NOT_ADDED: &str = "Flashcard not added";

#[derive(Serialize)]
struct ProcessRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessResponse {
    translation: Option<String>,
    source_lang: Option<String>,
    target_lang: Option<String>,
    anki_note_id: Option<serde_json::Value>,
    anki_error: Option<String>,
    anki_status: Option<String>,
}

impl ProcessResponse {
    fn side_effect(&self) -> Option<SideEffectStatus> {
        if self.anki_status.is_none() && self.anki_error.is_none() && self.anki_note_id.is_none()
        {
            return None;
        }

        let note_id = self.anki_note_id.as_ref().and_then(|id| {
            id.as_u64()
                .or_else(|| id.as_str().and_then(|s| s.parse().ok()))
        });

        if self.anki_status.as_deref() == Some(ANKI_ADDED) {
            return Some(SideEffectStatus::added(note_id));
        }

        let message = self
            .anki_error
            .clone()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| FLASHCARD_NOT_ADDED.to_string());
        Some(SideEffectStatus::failed(message))
    }
}

/// Client for `POST <api-base>/api/processTranslation`. The backend fixes the
/// language pair and records the word in a flashcard deck.
#[derive(Clone)]
pub struct OrchestratedTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl OrchestratedTranslator {
    pub fn new(endpoint: String) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

/// Validate an orchestrated-contract response. Flashcard failures are carried
/// alongside the translation, never instead of it.
pub fn parse_process_response(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<Translated, TranslateError> {
    check_status(status, body)?;

    let response: ProcessResponse = parse_body(body)?;
    let side_effect = response.side_effect();
    let translated_text = require_translation(response.translation, body)?;

    Ok(Translated {
        result: TranslationResult {
            translated_text,
            source_lang: response.source_lang,
            target_lang: response.target_lang,
        },
        side_effect,
    })
}

#[async_trait]
impl Translator for OrchestratedTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translated, TranslateError> {
        request.validate()?;

        tracing::debug!(endpoint = %self.endpoint, "Sending processTranslation request");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ProcessRequest {
                text: &request.text,
            })
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        let translated = parse_process_response(status, &bytes)?;
        if let Some(side_effect) = &translated.side_effect
            && !side_effect.succeeded
        {
            tracing::warn!(
                "Flashcard add failed: {}",
                side_effect.error_message.as_deref().unwrap_or_default()
            );
        }

        Ok(translated)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "orchestrated".to_string(),
            fixed_languages: true,
            adds_flashcards: true,
        }
    }
}
