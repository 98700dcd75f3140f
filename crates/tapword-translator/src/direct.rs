use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TranslateError;
use crate::request::{Translated, TranslationRequest, TranslationResult};
use crate::response::{check_status, parse_body, require_translation};
use crate::{ProviderMetadata, Translator};

#[derive(Serialize)]
struct DirectRequest<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct DirectResponse {
    translation: Option<String>,
    source_lang: Option<String>,
    target_lang: Option<String>,
}

/// Client for `POST <api-base>/v1/translate`
#[derive(Clone)]
pub struct DirectTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl DirectTranslator {
    pub fn new(endpoint: String) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

/// Validate a direct-contract response
pub fn parse_direct_response(
    status: reqwest::StatusCode,
    body: &[u8],
) -> Result<Translated, TranslateError> {
    check_status(status, body)?;

    let response: DirectResponse = parse_body(body)?;
    let translated_text = require_translation(response.translation, body)?;

    Ok(Translated {
        result: TranslationResult {
            translated_text,
            source_lang: response.source_lang,
            target_lang: response.target_lang,
        },
        side_effect: None,
    })
}

#[async_trait]
impl Translator for DirectTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translated, TranslateError> {
        request.validate()?;

        let body = DirectRequest {
            text: &request.text,
            source_lang: &request.source_lang,
            target_lang: &request.target_lang,
        };

        tracing::debug!(endpoint = %self.endpoint, "Sending direct translation request");
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        parse_direct_response(status, &bytes)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "direct".to_string(),
            fixed_languages: false,
            adds_flashcards: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::test_server::StubServer;

    #[test]
    fn hello_in_russian() {
        let translated =
            parse_direct_response(StatusCode::OK, r#"{"translation":"привет"}"#.as_bytes())
                .unwrap();
        assert_eq!(translated.result, TranslationResult::new("привет"));
        assert_eq!(translated.side_effect, None);
    }

    #[test]
    fn keeps_language_echoes() {
        let translated = parse_direct_response(
            StatusCode::OK,
            br#"{"translation":"hola","source_lang":"en","target_lang":"es"}"#,
        )
        .unwrap();
        assert_eq!(translated.result.source_lang.as_deref(), Some("en"));
        assert_eq!(translated.result.target_lang.as_deref(), Some("es"));
    }

    #[test]
    fn success_without_translation_fails() {
        let err =
            parse_direct_response(StatusCode::OK, br#"{"error":"model offline"}"#).unwrap_err();
        assert!(matches!(err, TranslateError::InvalidResponse(_)));
        assert_eq!(err.user_message(), "model offline");
    }

    #[test]
    fn error_status_wins_over_body() {
        let err = parse_direct_response(
            StatusCode::TOO_MANY_REQUESTS,
            br#"{"translation":"hola","message":"slow down"}"#,
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "slow down");
    }

    #[tokio::test]
    async fn posts_language_pair_as_json() {
        let server = StubServer::respond(200, r#"{"translation":"привет"}"#).await;
        let translator =
            DirectTranslator::with_client(server.client(), server.url("/v1/translate"));

        let translated = translator
            .translate(&TranslationRequest::new("hello", "en", "ru"))
            .await
            .unwrap();
        assert_eq!(translated.result.translated_text, "привет");

        let seen = server.received().await;
        assert!(seen.request_line.starts_with("POST /v1/translate"));
        assert_eq!(
            seen.json(),
            serde_json::json!({"text":"hello","source_lang":"en","target_lang":"ru"})
        );
    }

    #[tokio::test]
    async fn invalid_request_is_never_sent() {
        let translator = DirectTranslator::new("http://127.0.0.1:9/v1/translate".to_string());
        let err = translator
            .translate(&TranslationRequest::new("  ", "en", "ru"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Validation(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let addr = StubServer::unused_addr().await;
        let translator = DirectTranslator::with_client(
            StubServer::plain_client(),
            format!("http://{addr}/v1/translate"),
        );
        let err = translator
            .translate(&TranslationRequest::new("hello", "en", "ru"))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Network(_)));
        assert_eq!(err.user_message(), crate::error::UNREACHABLE_MESSAGE);
    }
}
