use serde::{Deserialize, Serialize};

fn default_fortune() -> String {
    "fortune".to_string()
}

fn default_cowsay() -> String {
    "cowsay".to_string()
}

/// Programs behind the easter eggs
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ExtrasConfig {
    #[serde(default = "default_fortune")]
    pub fortune: String,
    #[serde(default = "default_cowsay")]
    pub cowsay: String,
}

impl Default for ExtrasConfig {
    fn default() -> Self {
        Self {
            fortune: default_fortune(),
            cowsay: default_cowsay(),
        }
    }
}
