use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Text submitted from the search box
    Search(String),
    /// Search box was edited since the last lookup
    InputChanged,
    /// Read the search box aloud, `None` when the backend filled it in
    Speak(Option<String>),
    /// Put a random headword in the search box and look it up
    Random,
    ShowDefinition {
        term: String,
        markup: String,
    },
    ShowError(Dialog),
    /// Backend finished an event with nothing to show
    Idle,
    BackendReady,
    Terminate,
}

/// User-visible error message box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    pub title: String,
    pub primary: String,
    pub secondary: String,
}

impl Dialog {
    pub fn new(
        title: impl Into<String>,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}
