use reo_config::extras::ExtrasConfig;

use crate::external::ToolRunner;
use crate::fortune::{cow_fortune, fortune};
use crate::markup::Markup;
use crate::types::{CleanTerm, ColorScheme, MarkupText};

/// Inputs answered without a dictionary lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// dictd metadata headwords
    DatabaseInfo,
    Fortune,
    CowFortune,
    Terminate,
    SelfDescription,
}

/// Checked top to bottom, compared case-sensitively
const COMMANDS: &[(&str, Command)] = &[
    ("00-database-allchars", Command::DatabaseInfo),
    ("00-database-info", Command::DatabaseInfo),
    ("00-database-long", Command::DatabaseInfo),
    ("00-database-short", Command::DatabaseInfo),
    ("00-database-url", Command::DatabaseInfo),
    ("fortune -a", Command::Fortune),
    ("cowfortune", Command::CowFortune),
    ("crash now", Command::Terminate),
    ("close now", Command::Terminate),
    ("reo", Command::SelfDescription),
];

const NEAR_SPELLINGS: &str =
    "ro, re, roe, redo, reno, oreo, ceo, leo, neo, rho, rio, reb, red, ref, rem, rep, res, ret, rev, rex";

impl Command {
    pub fn parse(term: &str) -> Option<Command> {
        COMMANDS
            .iter()
            .find(|(literal, _)| *literal == term)
            .map(|(_, command)| *command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intercepted {
    Show(MarkupText),
    /// Ask the shell to end the process
    Terminate,
}

/// What the interceptor needs to answer a command
pub struct InterceptContext<'a> {
    pub runner: &'a dyn ToolRunner,
    pub extras: &'a ExtrasConfig,
    pub wordnet_version: &'a str,
    pub scheme: ColorScheme,
    pub markup: Markup,
}

pub async fn intercept(term: &CleanTerm, ctx: &InterceptContext<'_>) -> Option<Intercepted> {
    let command = Command::parse(term.as_str())?;
    tracing::debug!("Intercepted '{}' as {:?}", term, command);

    let m = ctx.markup;
    let response = match command {
        Command::DatabaseInfo => database_banner(ctx.wordnet_version, m),
        Command::Fortune => fortune(ctx.runner, ctx.extras, m).await,
        Command::CowFortune => cow_fortune(ctx.runner, ctx.extras, m).await,
        Command::Terminate => return Some(Intercepted::Terminate),
        Command::SelfDescription => self_description(ctx.scheme.word_color(), m),
    };

    Some(Intercepted::Show(response))
}

pub fn database_banner(wordnet_version: &str, m: Markup) -> MarkupText {
    m.mono(&m.text(&format!(" Running Reo with WordNet {wordnet_version}")))
}

pub fn self_description(word_color: &str, m: Markup) -> MarkupText {
    let lines = [
        format!("Pronunciation: {}", m.bold(&m.text("/ɹˈiːəʊ/"))),
        format!("  {} ~ {}", m.bold("Reo"), m.italic("Japanese Word")),
        format!(
            "  {} Name of this application, chosen kind of at random.",
            m.bold("1:")
        ),
        format!("  {} Japanese word meaning 'Wise Center'", m.bold("2:")),
        format!(" {}", m.bold("Similar Words:")),
        format!(
            " {}",
            m.italic(&m.color(word_color, &format!("  {NEAR_SPELLINGS}")))
        ),
    ];
    m.mono(&lines.join("\n"))
}
