use rand::Rng;
use rand::seq::SliceRandom;
use reo_config::dictionary::DictionaryConfig;

use crate::external::{ToolCommand, ToolRunner};
use crate::format::match_words;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Headwords of the database starting with `letter`
pub fn prefix_command(dictionary: &DictionaryConfig, letter: char) -> ToolCommand {
    ToolCommand::new(&dictionary.client)
        .arg("-m")
        .arg("-d")
        .arg(&dictionary.database)
        .arg("-s")
        .arg("prefix")
        .arg("--")
        .arg(letter.to_string())
}

fn pick(words: &[String]) -> Option<String> {
    words.choose(&mut rand::thread_rng()).cloned()
}

async fn word_list(path: &str) -> Vec<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => text
            .lines()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect(),
        Err(e) => {
            tracing::warn!("Could not read word list {}: {}", path, e);
            Vec::new()
        }
    }
}

/// Picks a headword from the configured word list, or from the database
/// entries under a random first letter when there is no usable list.
pub async fn random_word(runner: &dyn ToolRunner, dictionary: &DictionaryConfig) -> Option<String> {
    if let Some(path) = &dictionary.word_list {
        let words = word_list(path).await;
        if let Some(word) = pick(&words) {
            return Some(word);
        }
    }

    let letter = LETTERS[rand::thread_rng().gen_range(0..LETTERS.len())] as char;
    match runner.run(&prefix_command(dictionary, letter)).await {
        Ok(output) => {
            let word = pick(&match_words(&output.stdout));
            if word.is_none() {
                tracing::warn!("No headwords starting with '{}'", letter);
            }
            word
        }
        Err(e) => {
            tracing::error!("Error with dict: {}", e);
            None
        }
    }
}
