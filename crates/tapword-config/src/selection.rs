use serde::{Deserialize, Serialize};

fn default_debounce_ms() -> u64 {
    400
}

/// Longest phrase sent for translation
pub const MAX_PHRASE_WORDS: usize = 10;

fn default_max_words() -> usize {
    MAX_PHRASE_WORDS
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SelectionConfig {
    /// Delay after pointer release before the selection is read
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Word cap for a phrase, between 1 and `MAX_PHRASE_WORDS`
    #[serde(default = "default_max_words")]
    pub max_words: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_words: default_max_words(),
        }
    }
}
