use std::env;

use serde::{Deserialize, Serialize};

fn default_client() -> String {
    "dict".to_string()
}

fn default_database() -> String {
    "wn".to_string()
}

fn default_strategy() -> String {
    "lev".to_string()
}

fn default_sample_word() -> String {
    "test".to_string()
}

fn default_data_file() -> String {
    "/usr/share/dictd/wn.dict.dz".to_string()
}

/// Dictionary-protocol client settings
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Client binary, queried as `<client> -d <database> <term>`
    #[serde(default = "default_client")]
    pub client: String,
    #[serde(default = "default_database")]
    pub database: String,
    /// Match strategy for similar words
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Skip WordNet detection and use this version
    #[serde(default)]
    pub wordnet_version: Option<String>,
    /// Word looked up to find out which WordNet is installed
    #[serde(default = "default_sample_word")]
    pub sample_word: String,
    /// dictd data file checked by `--check`
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// One headword per line, used by `:random` instead of asking the server
    #[serde(default)]
    pub word_list: Option<String>,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let client = env::var("REO_DICT_CLIENT").unwrap_or_else(|_| default_client());
        let database = env::var("REO_DICT_DATABASE").unwrap_or_else(|_| default_database());
        let strategy = env::var("REO_DICT_STRATEGY").unwrap_or_else(|_| default_strategy());
        let word_list = env::var("REO_WORD_LIST").ok();

        Self {
            client,
            database,
            strategy,
            word_list,
            ..Self::default()
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            client: default_client(),
            database: default_database(),
            strategy: default_strategy(),
            wordnet_version: None,
            sample_word: default_sample_word(),
            data_file: default_data_file(),
            word_list: None,
        }
    }
}
