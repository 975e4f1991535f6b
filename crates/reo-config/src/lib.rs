use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::extras::ExtrasConfig;
use self::speech::SpeechConfig;
use self::ui::UiConfig;

pub mod dictionary;
pub mod extras;
pub mod speech;
pub mod ui;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub speech: SpeechConfig,
    pub extras: ExtrasConfig,
    pub ui: UiConfig,

    /// Folder holding custom definitions, one file per lowercase term
    pub custom_definitions_dir: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let custom_definitions_dir = env::var("REO_CDEF_DIR").ok();

        Config {
            dictionary: DictionaryConfig::new(),
            speech: SpeechConfig::new(),
            extras: ExtrasConfig::default(),
            ui: UiConfig::default(),

            custom_definitions_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Theme;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.dictionary.client, "dict");
        assert_eq!(config.dictionary.database, "wn");
        assert_eq!(config.dictionary.strategy, "lev");
        assert_eq!(config.speech.voice, "en-uk-rp");
        assert_eq!(config.speech.speed, 120);
        assert_eq!(config.extras.fortune, "fortune");
        assert_eq!(config.ui.theme, Theme::System);
        assert!(config.custom_definitions_dir.is_none());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let json = r#"{ "dictionary": { "database": "gcide" }, "ui": { "theme": "dark" } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.dictionary.database, "gcide");
        assert_eq!(config.dictionary.client, "dict");
        assert_eq!(config.ui.theme, Theme::Dark);
    }
}
