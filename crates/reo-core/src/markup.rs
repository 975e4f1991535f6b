use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::MarkupFlavor;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[a-zA-Z][^<>]*>").expect("valid tag regex"));

/// Escapes text for the widget's markup parser. Quotes are left alone.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Drops all tags and resolves the entities `escape` produces
pub fn to_plain(markup: &str) -> String {
    TAG.replace_all(markup, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Emits the restricted markup vocabulary in a given flavor.
///
/// Every wrapping method takes already-rendered inner markup; raw text goes
/// through [`Markup::text`] first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markup {
    flavor: MarkupFlavor,
}

impl Markup {
    pub fn new(flavor: MarkupFlavor) -> Self {
        Self { flavor }
    }

    pub fn flavor(&self) -> MarkupFlavor {
        self.flavor
    }

    pub fn text(&self, raw: &str) -> String {
        match self.flavor {
            MarkupFlavor::Pango => escape(raw),
            MarkupFlavor::Plain => raw.to_string(),
        }
    }

    pub fn bold(&self, inner: &str) -> String {
        self.wrap("b", inner)
    }

    pub fn italic(&self, inner: &str) -> String {
        self.wrap("i", inner)
    }

    pub fn mono(&self, inner: &str) -> String {
        self.wrap("tt", inner)
    }

    pub fn color(&self, color: &str, inner: &str) -> String {
        match self.flavor {
            MarkupFlavor::Pango => format!("<span foreground=\"{color}\">{inner}</span>"),
            MarkupFlavor::Plain => inner.to_string(),
        }
    }

    /// Adopts markup written by hand, e.g. a custom definition file
    pub fn from_pango(&self, pango: String) -> String {
        match self.flavor {
            MarkupFlavor::Pango => pango,
            MarkupFlavor::Plain => to_plain(&pango),
        }
    }

    fn wrap(&self, tag: &str, inner: &str) -> String {
        match self.flavor {
            MarkupFlavor::Pango => format!("<{tag}>{inner}</{tag}>"),
            MarkupFlavor::Plain => inner.to_string(),
        }
    }
}
