use std::env;

use serde::{Deserialize, Serialize};

fn default_program() -> String {
    "espeak-ng".to_string()
}

fn default_voice() -> String {
    "en-uk-rp".to_string()
}

fn default_speed() -> u32 {
    120
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Words per minute when reading a term aloud
    #[serde(default = "default_speed")]
    pub speed: u32,
}

impl SpeechConfig {
    pub fn new() -> Self {
        let program = env::var("REO_ESPEAK").unwrap_or_else(|_| default_program());
        let voice = env::var("REO_ESPEAK_VOICE").unwrap_or_else(|_| default_voice());

        Self {
            program,
            voice,
            speed: default_speed(),
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            voice: default_voice(),
            speed: default_speed(),
        }
    }
}
