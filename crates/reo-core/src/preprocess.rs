use crate::error::InputError;
use crate::types::CleanTerm;

/// Characters stripped from both ends of a search
pub const DISALLOWED_CHARS: &[char] = &[
    '<', '>', '"', '?', '`', '!', '[', ']', '(', ')', '/', '\\', ':', ';', ',',
];

fn is_disallowed(c: char) -> bool {
    DISALLOWED_CHARS.contains(&c)
}

/// Turns raw search box text into a lookup term.
///
/// Whitespace and disallowed characters are removed from both ends only;
/// the interior of the term is never touched.
pub fn normalize(raw: &str) -> Result<CleanTerm, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let stripped = trimmed.trim_matches(|c: char| c.is_whitespace() || is_disallowed(c));
    if stripped.is_empty() {
        return Err(InputError::InvalidCharacters);
    }

    Ok(CleanTerm::new(stripped))
}

/// Undoes line wrapping in pasted or selected text
pub fn flatten(text: &str) -> String {
    text.replace("-\n         ", "-")
        .replace('\n', " ")
        .replace("         ", "")
}
