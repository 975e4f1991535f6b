use once_cell::sync::Lazy;
use regex::Regex;
use reo_config::dictionary::DictionaryConfig;

use crate::external::{ToolCommand, ToolRunner};

pub const DEFAULT_VERSION: &str = "3.1";

static SOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"From WordNet \(r\) (3\.[01]) \(\d{4}\) \[[^\]]+\]:").expect("valid wordnet regex")
});

/// Reads the WordNet version out of a definition's source line
pub fn parse_version(output: &str) -> Option<&str> {
    SOURCE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|version| version.as_str())
}

/// Looks up the sample word and reports which WordNet answered it
pub async fn detect_version(runner: &dyn ToolRunner, dictionary: &DictionaryConfig) -> String {
    if let Some(version) = &dictionary.wordnet_version {
        tracing::info!("Using WordNet {} as per local config", version);
        return version.clone();
    }

    let command = ToolCommand::new(&dictionary.client)
        .arg("-d")
        .arg(&dictionary.database)
        .arg("--")
        .arg(&dictionary.sample_word);

    match runner.run(&command).await {
        Ok(output) => match parse_version(&output.stdout) {
            Some(version) => {
                tracing::info!("Using WordNet {}", version);
                version.to_string()
            }
            None => {
                tracing::warn!("Could not detect WordNet version, assuming {}", DEFAULT_VERSION);
                DEFAULT_VERSION.to_string()
            }
        },
        Err(e) => {
            tracing::error!("Error with dict: {}", e);
            DEFAULT_VERSION.to_string()
        }
    }
}
