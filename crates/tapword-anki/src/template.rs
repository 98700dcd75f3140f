use serde::{Deserialize, Serialize};

use crate::note::{Note, NoteFields, NoteOptions};

const NOTE_TAG: &str = "tapword";

/// Deck, note type and field layout for a phrase card.
/// `{phrase}` and `{translation}` are substituted in both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub deck: String,
    pub model: String,
    pub front: String,
    pub back: String,
}

impl CardTemplate {
    /// Phrase on the front, translation on the back
    pub fn phrase_card(deck: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            deck: deck.into(),
            model: model.into(),
            front: "{phrase}".to_string(),
            back: "{translation}".to_string(),
        }
    }

    pub fn note(&self, phrase: &str, translation: &str) -> Note {
        let fill = |side: &str| {
            side.replace("{phrase}", phrase)
                .replace("{translation}", translation)
        };

        Note {
            deck_name: self.deck.clone(),
            model_name: self.model.clone(),
            fields: NoteFields {
                front: fill(&self.front),
                back: fill(&self.back),
            },
            options: NoteOptions::default(),
            tags: vec![NOTE_TAG.to_string()],
        }
    }
}
