use std::env;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::host::HostConfig;
use self::popup::PopupConfig;
use self::selection::{MAX_PHRASE_WORDS, SelectionConfig};
use self::translator::{ApiContract, TranslatorConfig};
use self::viewer::ViewerConfig;

pub mod anki;
pub mod host;
pub mod popup;
pub mod selection;
pub mod translator;
pub mod viewer;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown API contract: {0}")]
    UnknownContract(String),

    #[error("Language code must be two letters, got {0:?}")]
    InvalidLanguage(String),

    #[error("selection.max_words must be between 1 and 10, got {0}")]
    InvalidWordLimit(usize),

    #[error("translator.timeout_seconds must be positive")]
    ZeroTimeout,

    #[error("Invalid viewer scale range: min {min}, max {max}, step {step}")]
    InvalidScale { min: f32, max: f32, step: f32 },
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub selection: SelectionConfig,
    pub popup: PopupConfig,
    pub viewer: ViewerConfig,
    pub host: HostConfig,
    pub anki: AnkiConfig,
}

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base) = lookup("TAPWORD_API_BASE") {
            self.translator.api_base = base;
        }

        if let Some(contract) = lookup("TAPWORD_CONTRACT") {
            match contract.parse::<ApiContract>() {
                Ok(contract) => self.translator.contract = contract,
                Err(e) => tracing::warn!("Ignoring TAPWORD_CONTRACT: {e}"),
            }
        }

        if let Some(lang) = lookup("TAPWORD_SOURCE_LANG") {
            self.translator.source_lang = lang;
        }

        if let Some(lang) = lookup("TAPWORD_TARGET_LANG") {
            self.translator.target_lang = lang;
        }

        if let Some(timeout) = lookup("TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
            self.translator.timeout_seconds = timeout;
        }

        if let Some(debounce) = lookup("DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.selection.debounce_ms = debounce;
        }

        if let Some(host) = lookup("TAPWORD_HOST") {
            self.host.enabled = matches!(host.as_str(), "1" | "true" | "yes");
        }

        if let Some(url) = lookup("ANKI_CONNECT_URL") {
            self.anki.url = url;
        }
    }

    /// Checks values that would otherwise only fail once a request is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        for lang in [&self.translator.source_lang, &self.translator.target_lang] {
            if lang.len() != 2 || !lang.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::InvalidLanguage(lang.clone()));
            }
        }

        let max_words = self.selection.max_words;
        if !(1..=MAX_PHRASE_WORDS).contains(&max_words) {
            return Err(ConfigError::InvalidWordLimit(max_words));
        }

        if self.translator.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let viewer = &self.viewer;
        let scale_ok = viewer.min_scale.is_finite()
            && viewer.max_scale.is_finite()
            && viewer.scale_step.is_finite()
            && viewer.min_scale > 0.0
            && viewer.min_scale <= viewer.max_scale
            && viewer.scale_step > 0.0;
        if !scale_ok {
            return Err(ConfigError::InvalidScale {
                min: viewer.min_scale,
                max: viewer.max_scale,
                step: viewer.scale_step,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("TAPWORD_API_BASE", "https://tr.example.com"),
            ("TAPWORD_CONTRACT", "orchestrated"),
            ("TIMEOUT_SECONDS", "3"),
            ("DEBOUNCE_MS", "350"),
            ("TAPWORD_HOST", "true"),
        ]));

        assert_eq!(config.translator.api_base, "https://tr.example.com");
        assert_eq!(config.translator.contract, ApiContract::Orchestrated);
        assert_eq!(config.translator.timeout_seconds, 3);
        assert_eq!(config.selection.debounce_ms, 350);
        assert!(config.host.enabled);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("TAPWORD_CONTRACT", "soap"),
            ("TIMEOUT_SECONDS", "soon"),
        ]));

        assert_eq!(config.translator.contract, ApiContract::Direct);
        assert_eq!(config.translator.timeout_seconds, 15);
    }

    #[test]
    fn validate_rejects_long_language_codes() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.translator.target_lang = "rus".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLanguage(lang)) if lang == "rus"
        ));
    }

    #[test]
    fn validate_caps_phrase_words() {
        for words in [0, 11, 25] {
            let mut config = Config::default();
            config.selection.max_words = words;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidWordLimit(n)) if n == words
            ));
        }

        let mut config = Config::default();
        config.selection.max_words = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.translator.timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn validate_rejects_unusable_scale_range() {
        let profile: Config =
            serde_json::from_str(r#"{"viewer":{"min_scale":3.0,"max_scale":1.0}}"#).unwrap();
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::InvalidScale { .. })
        ));

        let mut config = Config::default();
        config.viewer.max_scale = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.viewer.scale_step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_profile_fills_sections() {
        let config: Config =
            serde_json::from_str(r#"{"selection":{"max_words":5},"anki":{"enabled":true}}"#)
                .unwrap();
        assert_eq!(config.selection.max_words, 5);
        assert_eq!(config.selection.debounce_ms, 400);
        assert!(config.anki.enabled);
        assert_eq!(config.anki.url, "http://localhost:8765");
        assert_eq!(config.popup.margin, 10.0);
    }
}
