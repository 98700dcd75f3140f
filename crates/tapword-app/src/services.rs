use std::sync::Arc;
use std::time::Duration;

use tapword_anki::{AnkiConnectClient, CardTemplate};
use tapword_config::Config;
use tapword_config::translator::ApiContract;
use tapword_translator::{DirectTranslator, OrchestratedTranslator, Translator};

/// Client-side flashcard forwarding
#[derive(Clone)]
pub struct Flashcards {
    pub client: AnkiConnectClient,
    pub template: CardTemplate,
}

/// Remote collaborators used by the event loop
#[derive(Clone)]
pub struct Services {
    pub translator: Arc<dyn Translator>,
    pub flashcards: Option<Flashcards>,
    pub timeout: Duration,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let endpoint = config.translator.endpoint();
        let translator: Arc<dyn Translator> = match config.translator.contract {
            ApiContract::Direct => Arc::new(DirectTranslator::new(endpoint.clone())),
            ApiContract::Orchestrated => Arc::new(OrchestratedTranslator::new(endpoint.clone())),
        };

        let metadata = translator.metadata();
        tracing::info!(
            "Translation contract: {} ({endpoint}), fixed languages: {}",
            metadata.name,
            metadata.fixed_languages
        );

        let flashcards = if !config.anki.enabled {
            None
        } else if metadata.adds_flashcards {
            tracing::warn!("Backend already records flashcards, ignoring anki.enabled");
            None
        } else {
            Some(Flashcards {
                client: AnkiConnectClient::new(config.anki.url.clone()),
                template: CardTemplate::phrase_card(
                    config.anki.deck.clone(),
                    config.anki.model.clone(),
                ),
            })
        };

        Self {
            translator,
            flashcards,
            timeout: Duration::from_secs(config.translator.timeout_seconds),
        }
    }
}
