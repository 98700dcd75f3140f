use std::fmt;
use std::time::Duration;

use tapword_config::translator::TranslatorConfig;
use tapword_translator::{
    SideEffectStatus, TranslateError, Translated, TranslationRequest, TranslationResult,
    Translator,
};
use uuid::Uuid;

/// Identifies one dispatched request; completions carrying any other tag are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTag(Uuid);

impl RequestTag {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded(TranslationResult),
    Failed(String),
}

/// A validated request to run, stamped with the tag its completion must carry
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub tag: RequestTag,
    pub request: TranslationRequest,
}

pub type Outcome = Result<Translated, TranslateError>;

/// Lifecycle of the translation for the currently bound phrase
#[derive(Debug)]
pub struct TranslationSession {
    source_lang: String,
    target_lang: String,
    enabled: bool,
    phrase: Option<String>,
    state: RequestState,
    side_effect: Option<SideEffectStatus>,
    in_flight: Option<RequestTag>,
    settled: Option<RequestTag>,
}

impl TranslationSession {
    pub fn new(
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            enabled,
            phrase: None,
            state: RequestState::Idle,
            side_effect: None,
            in_flight: None,
            settled: None,
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self::new(
            config.source_lang.clone(),
            config.target_lang.clone(),
            config.enabled,
        )
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn side_effect(&self) -> Option<&SideEffectStatus> {
        self.side_effect.as_ref()
    }

    pub fn phrase(&self) -> Option<&str> {
        self.phrase.as_deref()
    }

    pub fn in_flight(&self) -> Option<RequestTag> {
        self.in_flight
    }

    /// Replace the bound phrase. Previous state is always discarded first; a
    /// non-empty phrase is armed straight away when enabled.
    pub fn bind(&mut self, phrase: Option<String>) -> Option<Dispatch> {
        self.reset();
        self.phrase = phrase;

        let armable = self
            .phrase
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());

        if self.enabled && armable {
            self.start()
        } else {
            None
        }
    }

    /// Unbind the phrase and return to Idle
    pub fn clear(&mut self) {
        self.reset();
        self.phrase = None;
    }

    /// Re-run the request for the bound phrase. No-op while pending.
    pub fn retry(&mut self) -> Option<Dispatch> {
        if self.state == RequestState::Pending {
            tracing::debug!("Retry ignored, request {:?} still pending", self.in_flight);
            return None;
        }
        self.start()
    }

    /// Back to Idle. Whatever is in flight will be ignored when it lands.
    pub fn reset(&mut self) {
        if let Some(tag) = self.in_flight.take() {
            tracing::debug!("Abandoning request {tag}");
        }
        self.state = RequestState::Idle;
        self.side_effect = None;
        self.settled = None;
    }

    fn start(&mut self) -> Option<Dispatch> {
        let request = TranslationRequest::new(
            self.phrase.clone().unwrap_or_default(),
            self.source_lang.clone(),
            self.target_lang.clone(),
        );

        self.side_effect = None;
        self.settled = None;

        if let Err(e) = request.validate() {
            tracing::warn!("Translation request rejected locally: {e}");
            self.in_flight = None;
            self.state = RequestState::Failed(e.user_message());
            return None;
        }

        let tag = RequestTag::new();
        self.in_flight = Some(tag);
        self.state = RequestState::Pending;
        tracing::debug!("Dispatching request {tag} for {:?}", request.text);

        Some(Dispatch { tag, request })
    }

    /// Apply a completion. Returns false when the tag is stale.
    pub fn complete(&mut self, tag: RequestTag, outcome: Outcome) -> bool {
        if self.in_flight != Some(tag) {
            tracing::debug!("Discarding stale completion for request {tag}");
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(translated) => {
                self.state = RequestState::Succeeded(translated.result);
                self.side_effect = translated.side_effect;
                self.settled = Some(tag);
            }
            Err(e) => {
                if let TranslateError::Network(source) = &e {
                    tracing::warn!("Translation service unreachable: {source}");
                } else {
                    tracing::info!("Translation failed: {e}");
                }
                self.state = RequestState::Failed(e.user_message());
            }
        }

        true
    }

    /// Attach a side-effect outcome produced after the translation settled.
    /// Never changes the translation state.
    pub fn record_side_effect(&mut self, tag: RequestTag, status: SideEffectStatus) -> bool {
        if self.settled != Some(tag) || !matches!(self.state, RequestState::Succeeded(_)) {
            tracing::debug!("Discarding stale side effect for request {tag}");
            return false;
        }
        self.side_effect = Some(status);
        true
    }
}

/// Run one request, bounded by `timeout`
pub async fn dispatch(
    translator: &dyn Translator,
    request: &TranslationRequest,
    timeout: Duration,
) -> Outcome {
    match tokio::time::timeout(timeout, translator.translate(request)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(TranslateError::Timeout(timeout)),
    }
}
