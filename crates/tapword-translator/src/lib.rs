pub mod direct;
pub mod error;
pub mod orchestrated;
pub mod request;
pub mod response;

#[cfg(test)]
mod test_server;

pub use direct::DirectTranslator;
pub use error::TranslateError;
pub use orchestrated::OrchestratedTranslator;
pub use request::{SideEffectStatus, Translated, TranslationRequest, TranslationResult};

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Validate and send one request. Resolves exactly once.
    async fn translate(&self, request: &TranslationRequest) -> Result<Translated, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    /// Language pair is decided by the backend, not the request
    pub fixed_languages: bool,
    /// Responses may carry a flashcard side effect
    pub adds_flashcards: bool,
}
