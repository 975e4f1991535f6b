//! Re-emits plain `dict` output as colored, structured markup.
//!
//! The client prints one block per matching headword:
//!
//! ```text
//! 1 definition found
//!
//! From WordNet (r) 3.1 (2011) [wn]:
//!
//!   cat
//!       n 1: feline mammal usually having thick soft fur and no
//!            ability to roar: domestic cats; wildcats [syn: {cat},
//!            {true cat}]
//!       2: an informal term for a youth or man; "a nice guy" [syn:
//!          {guy}, {cat}]
//!       v 1: beat with a cat-o'-nine-tails
//! ```
//!
//! The count and source lines are dropped, the headword line is replaced by a
//! `headword ~ part of speech` heading per part of speech, continuation lines
//! are folded into their sense, quoted examples get the sentence color and
//! `{cross references}` / `[syn: ...]` lists get the word color.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup::Markup;
use crate::types::{ColorScheme, MarkupText};

static COUNT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+ definitions? found$").expect("valid count regex"));
static SOURCE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^From .*\[[^\]]+\]:$").expect("valid source regex"));
static SENSE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<pos>n|v|adj|adv)\b\s*)?(?P<num>\d+)?\s*:(?:\s+(?P<text>.*)|$)")
        .expect("valid sense regex")
});
static QUOTED_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("valid quote regex"));

#[derive(Debug, Default)]
struct Entry {
    headword: String,
    groups: Vec<Group>,
}

#[derive(Debug, Default)]
struct Group {
    pos: Option<String>,
    senses: Vec<Sense>,
}

#[derive(Debug)]
struct Sense {
    number: Option<u32>,
    text: String,
}

#[derive(Debug, PartialEq, Eq)]
enum State {
    Preamble,
    Headword,
    Body,
}

/// `[syn: {a}, {b}]` style list attached to a sense
#[derive(Debug, PartialEq, Eq)]
struct CrossReference {
    label: String,
    words: Vec<String>,
}

/// Formats a non-empty definition body returned by the dictionary client
pub fn format_definition(
    raw: &str,
    term: &str,
    sentence_color: &str,
    word_color: &str,
    m: Markup,
) -> MarkupText {
    let entries = parse(raw, term);
    tracing::debug!("Parsed {} dictionary entries for '{}'", entries.len(), term);

    let mut blocks = Vec::with_capacity(entries.len());
    for entry in &entries {
        let mut lines = Vec::new();
        for group in &entry.groups {
            let headword = m.bold(&m.text(&entry.headword));
            match &group.pos {
                Some(pos) => lines.push(format!(
                    "{headword} ~ {}",
                    m.italic(&m.text(part_of_speech_name(pos)))
                )),
                None => lines.push(headword),
            }

            for sense in &group.senses {
                let (body, references) = render_sense(&sense.text, sentence_color, word_color, m);
                match sense.number {
                    Some(number) => lines.push(format!("  {} {body}", m.bold(&format!("{number}:")))),
                    None => lines.push(format!("  {body}")),
                }
                for reference in references {
                    lines.push(format!(
                        "    {} {}",
                        m.bold(&m.text(&format!("{}:", reference.label))),
                        m.italic(&m.color(word_color, &m.text(&reference.words.join(", "))))
                    ));
                }
            }
        }
        blocks.push(lines.join("\n"));
    }

    blocks.join("\n\n")
}

/// Same as [`format_definition`] with colors taken from a scheme
pub fn format_definition_with(raw: &str, term: &str, scheme: ColorScheme, m: Markup) -> MarkupText {
    format_definition(raw, term, scheme.sentence_color(), scheme.word_color(), m)
}

/// Words listed in `match` output, in order, duplicates kept
pub fn match_words(raw: &str) -> Vec<String> {
    let mut candidates: Vec<String> = QUOTED_WORD
        .captures_iter(raw)
        .map(|caps| caps[1].trim().to_string())
        .collect();

    if candidates.is_empty() {
        for line in raw.lines() {
            let line = match line.split_once(':') {
                Some((db, rest)) if !db.trim().contains(' ') => rest,
                _ => line,
            };
            candidates.extend(
                line.split(',')
                    .map(str::trim)
                    .filter(|word| !word.is_empty())
                    .map(str::to_string),
            );
        }
    }

    candidates
}

/// Reduces `match` output to a comma separated list without the term itself
pub fn format_similar(raw: &str, term: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for word in match_words(raw) {
        if word.eq_ignore_ascii_case(term) || words.contains(&word) {
            continue;
        }
        words.push(word);
    }

    words.join(", ")
}

fn parse(raw: &str, term: &str) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut state = State::Preamble;

    for line in raw.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() || COUNT_LINE.is_match(trimmed) {
            continue;
        }
        if SOURCE_LINE.is_match(trimmed) {
            state = State::Headword;
            continue;
        }

        if state != State::Body {
            state = State::Body;
            if SENSE_LINE.is_match(trimmed) {
                entries.push(Entry {
                    headword: term.to_string(),
                    groups: Vec::new(),
                });
            } else {
                entries.push(Entry {
                    headword: headword_of(trimmed, term),
                    groups: Vec::new(),
                });
                continue;
            }
        }

        let Some(entry) = entries.last_mut() else {
            continue;
        };

        match sense_of(trimmed) {
            Some((pos, number, text)) => {
                let start_group = match (&pos, entry.groups.last()) {
                    (_, None) => true,
                    (Some(pos), Some(group)) => group.pos.as_deref() != Some(pos.as_str()),
                    (None, Some(_)) => false,
                };
                if start_group {
                    entry.groups.push(Group {
                        pos,
                        senses: Vec::new(),
                    });
                }
                if let Some(group) = entry.groups.last_mut() {
                    group.senses.push(Sense {
                        number,
                        text: text.to_string(),
                    });
                }
            }
            None => {
                if entry.groups.is_empty() {
                    entry.groups.push(Group::default());
                }
                if let Some(group) = entry.groups.last_mut() {
                    match group.senses.last_mut() {
                        Some(sense) => {
                            if !sense.text.is_empty() {
                                sense.text.push(' ');
                            }
                            sense.text.push_str(trimmed);
                        }
                        None => group.senses.push(Sense {
                            number: None,
                            text: trimmed.to_string(),
                        }),
                    }
                }
            }
        }
    }

    entries
}

fn sense_of(line: &str) -> Option<(Option<String>, Option<u32>, &str)> {
    let caps = SENSE_LINE.captures(line)?;
    let pos = caps.name("pos").map(|p| p.as_str().to_string());
    let number = caps.name("num").and_then(|n| n.as_str().parse().ok());
    if pos.is_none() && number.is_none() {
        return None;
    }
    let text = caps.name("text").map_or("", |t| t.as_str().trim());
    Some((pos, number, text))
}

/// Headword lines may carry a pronunciation, e.g. `Cat \Cat\ (k[a^]t), n.`
fn headword_of(line: &str, term: &str) -> String {
    let headword = line
        .split(['\\', '(', '[', ','])
        .next()
        .map(str::trim)
        .unwrap_or_default();
    if headword.is_empty() {
        term.to_string()
    } else {
        headword.to_string()
    }
}

fn part_of_speech_name(pos: &str) -> &str {
    match pos {
        "n" => "noun",
        "v" => "verb",
        "adj" => "adjective",
        "adv" => "adverb",
        other => other,
    }
}

fn reference_label(tag: &str) -> String {
    match tag {
        "syn" => "Synonyms".to_string(),
        "ant" => "Antonyms".to_string(),
        "also" => "See also".to_string(),
        other => other.to_string(),
    }
}

fn render_sense(
    text: &str,
    sentence_color: &str,
    word_color: &str,
    m: Markup,
) -> (String, Vec<CrossReference>) {
    let mut out = String::new();
    let mut references = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find(['"', '{', '[']) {
        out.push_str(&m.text(&rest[..pos]));
        let open = &rest[pos..pos + 1];
        let close = match open {
            "\"" => '"',
            "{" => '}',
            _ => ']',
        };
        let after = &rest[pos + 1..];
        let Some(end) = after.find(close) else {
            out.push_str(&m.text(&rest[pos..]));
            rest = "";
            break;
        };
        let inner = &after[..end];

        match open {
            "\"" => {
                let sentence = format!("\"{inner}\"");
                out.push_str(&m.color(sentence_color, &m.text(&sentence)));
            }
            "{" => out.push_str(&m.color(word_color, &m.text(inner))),
            _ => match cross_reference(inner) {
                Some(reference) => references.push(reference),
                None => out.push_str(&m.text(&format!("[{inner}]"))),
            },
        }
        rest = &after[end + 1..];
    }
    out.push_str(&m.text(rest));

    (out.trim_end().to_string(), references)
}

fn cross_reference(inner: &str) -> Option<CrossReference> {
    let (tag, list) = inner.split_once(':')?;
    let tag = tag.trim();
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let words = list
        .split(',')
        .map(|word| word.trim().trim_matches(['{', '}']).trim().to_string())
        .filter(|word| !word.is_empty())
        .collect();
    Some(CrossReference {
        label: reference_label(tag),
        words,
    })
}
