use std::path::{Path, PathBuf};

use crate::error::OverrideError;
use crate::markup::Markup;
use crate::types::{CleanTerm, ColorScheme, MarkupText};

/// Marker line that suppresses the disclaimer
pub const WARNING_HIDE: &str = "\n[warninghide]";

const DISCLAIMER: &str = "\n<span foreground=\"#e6292f\">NOTE: This is a Custom definition. No one is to be held responsible for errors in this.</span>";

/// Replaces placeholders in a single left-to-right scan.
///
/// At every position the first matching literal in `table` wins, so longer
/// spellings must come before the shorter ones they contain.
pub fn substitute(text: &str, table: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while let Some(c) = rest.chars().next() {
        for (literal, replacement) in table {
            if rest.starts_with(literal) {
                out.push_str(replacement);
                rest = &rest[literal.len()..];
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// User-written definitions that preempt the dictionary
#[derive(Debug, Clone)]
pub struct CustomDefinitions {
    dir: PathBuf,
}

impl CustomDefinitions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `term`, `None` when the term cannot name a file in the folder
    pub fn path_for(&self, term: &str) -> Option<PathBuf> {
        let key = term.to_lowercase();
        if key == "." || key == ".." || key.contains(['/', '\\']) {
            return None;
        }
        Some(self.dir.join(key))
    }

    /// Loads the custom definition for `term` if one exists
    pub async fn resolve(
        &self,
        term: &CleanTerm,
        scheme: ColorScheme,
        m: Markup,
    ) -> Result<Option<MarkupText>, OverrideError> {
        let Some(path) = self.path_for(term.as_str()) else {
            return Ok(None);
        };
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|source| OverrideError::Read {
                path: path.clone(),
                source,
            })?;
        if !exists {
            return Ok(None);
        }

        tracing::info!("Using custom definition {}", path.display());
        let template = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| OverrideError::Read {
                path: path.clone(),
                source,
            })?;

        Ok(Some(m.from_pango(render(&template, scheme))))
    }
}

fn render(template: &str, scheme: ColorScheme) -> String {
    let word = scheme.word_color();
    let sentence = scheme.sentence_color();
    let table = [
        ("<i>($WORDCOL)</i>", word),
        ("<i>($SENCOL)</i>", sentence),
        ("($WORDCOL)", word),
        ("($SENCOL)", sentence),
        ("$WORDCOL", word),
        ("$SENCOL", sentence),
    ];
    let text = substitute(template, &table);

    if text.contains(WARNING_HIDE) {
        text.replace(WARNING_HIDE, "")
    } else {
        text + DISCLAIMER
    }
}
