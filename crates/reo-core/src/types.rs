use std::fmt;

/// Markup in the display widget's vocabulary (bold, italic, colour span, monospace)
pub type MarkupText = String;

/// Light/dark dependent pair of colours used to tint lookup output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Colour of example sentences
    pub fn sentence_color(self) -> &'static str {
        match self {
            ColorScheme::Light => "blue",
            ColorScheme::Dark => "cyan",
        }
    }

    /// Colour of similar words, synonyms and antonyms
    pub fn word_color(self) -> &'static str {
        match self {
            ColorScheme::Light => "green",
            ColorScheme::Dark => "lightgreen",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupFlavor {
    #[default]
    Pango,
    Plain,
}

/// A term that passed input normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanTerm(String);

impl CleanTerm {
    pub(crate) fn new(term: impl Into<String>) -> Self {
        Self(term.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CleanTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal result of one external source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutput {
    Found(String),
    /// Tool ran but printed nothing
    Empty,
    /// Tool could not be run at all
    Failed { program: String },
}

impl SourceOutput {
    pub fn is_found(&self) -> bool {
        matches!(self, SourceOutput::Found(_))
    }

    pub fn text(&self) -> &str {
        match self {
            SourceOutput::Found(text) => text,
            _ => "",
        }
    }
}

/// Raw outputs of the three lookup sources for one term
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub definition: SourceOutput,
    pub pronunciation: SourceOutput,
    pub similar: SourceOutput,
}
