use std::io;
use std::path::PathBuf;

use reo_types::Dialog;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("No text entered")]
    Empty,

    #[error("Input consists only of invalid characters")]
    InvalidCharacters,
}

#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("Failed to read custom definition {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("'{program}' is not installed")]
    Missing {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Status { program: String, status: String },
}

impl ToolError {
    pub fn program(&self) -> &str {
        match self {
            ToolError::Missing { program, .. }
            | ToolError::Io { program, .. }
            | ToolError::Status { program, .. } => program,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Override(#[from] OverrideError),

    #[error("No random word could be picked")]
    NoRandomWord,
}

impl SearchError {
    /// Message box to show, `None` when the error is silently ignored
    pub fn dialog(&self) -> Option<Dialog> {
        match self {
            SearchError::Input(InputError::Empty) => None,
            SearchError::Input(InputError::InvalidCharacters) => Some(Dialog::new(
                "Error: Invalid Input!",
                "Invalid Characters!",
                "Reo thinks that your input was actually \njust a bunch of useless characters. \nSo, 'Invalid Characters' error!",
            )),
            SearchError::Override(OverrideError::Read { path, .. }) => Some(Dialog::new(
                "Error: Lookup Failed!",
                "Custom definition unreadable!",
                format!("Reo could not read the custom definition at \n{}", path.display()),
            )),
            SearchError::NoRandomWord => Some(Dialog::new(
                "Error: Random Word Failed!",
                "No random word!",
                "Reo could not pick a random word. \nIs WordNet installed?",
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpeakError {
    #[error("Nothing to read aloud")]
    NothingEntered,

    #[error("Read aloud requested before a search")]
    NotSearched,

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl SpeakError {
    pub fn dialog(&self) -> Dialog {
        match self {
            SpeakError::NothingEntered => Dialog::new(
                "Umm..?",
                "Umm..?",
                "Reo can't find any text there! You sure \nyou typed something?",
            ),
            SpeakError::NotSearched => Dialog::new(
                "Sorry!!",
                "Sorry!!",
                "I'm sorry but you have to do a search first \nbefore trying to listen to it. I mean, Reo \nis NOT a Text-To-Speech Software!",
            ),
            SpeakError::Tool(err) => Dialog::new(
                "Error: Audio Failed!",
                "Could not read the term aloud!",
                format!("Install '{}' to hear pronunciations.", err.program()),
            ),
        }
    }
}
