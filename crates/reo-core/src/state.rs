/// What the pipeline remembers between searches of one search box.
///
/// Passed into every search and handed back updated, the caller owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupSession {
    last_term: Option<String>,
    searched: bool,
}

impl LookupSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed input of the last completed search
    pub fn last_term(&self) -> Option<&str> {
        self.last_term.as_deref()
    }

    /// A dictionary or custom lookup completed since the input last changed
    pub fn searched(&self) -> bool {
        self.searched
    }

    pub fn is_repeat(&self, text: &str) -> bool {
        self.last_term.as_deref() == Some(text.trim())
    }

    /// The search box was edited
    pub fn input_changed(self) -> Self {
        Self::default()
    }

    pub(crate) fn completed(self, text: &str, searched: bool) -> Self {
        Self {
            last_term: Some(text.trim().to_string()),
            searched,
        }
    }
}
