use once_cell::sync::Lazy;
use regex::Regex;
use reo_config::dictionary::DictionaryConfig;
use reo_config::speech::SpeechConfig;

use crate::external::{ToolCommand, ToolRunner};
use crate::format::{format_definition, format_similar};
use crate::markup::Markup;
use crate::types::{CleanTerm, ColorScheme, LookupResult, MarkupText, SourceOutput};

/// Color of messages about tools that could not be run
pub const WARNING_COLOR: &str = "#e6292f";

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\n\s*").expect("valid line break regex"));

pub fn definition_command(dictionary: &DictionaryConfig, term: &str) -> ToolCommand {
    ToolCommand::new(&dictionary.client)
        .arg("-d")
        .arg(&dictionary.database)
        .arg("--")
        .arg(term)
}

pub fn pronunciation_command(speech: &SpeechConfig, term: &str) -> ToolCommand {
    ToolCommand::new(&speech.program)
        .arg(format!("-v{}", speech.voice))
        .arg("--ipa")
        .arg("-q")
        .arg("--")
        .arg(term)
}

pub fn similar_command(dictionary: &DictionaryConfig, term: &str) -> ToolCommand {
    ToolCommand::new(&dictionary.client)
        .arg("-m")
        .arg("-d")
        .arg(&dictionary.database)
        .arg("-s")
        .arg(&dictionary.strategy)
        .arg("--")
        .arg(term)
}

async fn run_source(runner: &dyn ToolRunner, command: ToolCommand) -> SourceOutput {
    match runner.run(&command).await {
        Ok(output) => {
            if !output.success {
                tracing::info!("`{}` exited unsuccessfully: {}", command, output.stderr.trim());
            }
            if output.stdout.trim().is_empty() {
                SourceOutput::Empty
            } else {
                SourceOutput::Found(output.stdout)
            }
        }
        Err(e) => {
            tracing::error!("Didn't work! ERROR INFO: {}", e);
            SourceOutput::Failed {
                program: command.program,
            }
        }
    }
}

/// Runs definition, pronunciation and similar-words queries side by side
/// and waits for all three.
pub async fn fetch(
    runner: &dyn ToolRunner,
    dictionary: &DictionaryConfig,
    speech: &SpeechConfig,
    term: &str,
) -> LookupResult {
    let (definition, pronunciation, similar) = tokio::join!(
        run_source(runner, definition_command(dictionary, term)),
        run_source(runner, pronunciation_command(speech, term)),
        run_source(runner, similar_command(dictionary, term)),
    );

    tracing::debug!(
        "Sources for '{}': definition {}, pronunciation {}, similar {}",
        term,
        definition.is_found(),
        pronunciation.is_found(),
        similar.is_found()
    );

    LookupResult {
        definition,
        pronunciation,
        similar,
    }
}

fn unavailable(program: &str, m: Markup) -> String {
    m.color(
        WARNING_COLOR,
        &m.text(&format!("Could not run '{program}'. Is it installed?")),
    )
}

fn not_found(term: &str, m: Markup) -> String {
    m.text(&format!("Could not find definition for '{term}'."))
}

/// Merges the three source outputs into the final text
pub fn merge(result: &LookupResult, term: &str, scheme: ColorScheme, m: Markup) -> MarkupText {
    let found = result.definition.is_found();
    let word_color = scheme.word_color();

    let definition = match &result.definition {
        SourceOutput::Found(raw) => {
            format_definition(raw, term, scheme.sentence_color(), word_color, m)
        }
        SourceOutput::Empty => not_found(term, m),
        SourceOutput::Failed { program } => {
            format!("{}\n{}", not_found(term, m), unavailable(program, m))
        }
    };

    let label = if found {
        "Pronunciation"
    } else {
        "Probable Pronunciation"
    };
    let phonetic = match &result.pronunciation {
        SourceOutput::Failed { program } => unavailable(program, m),
        other => {
            let ipa = LINE_BREAK.replace_all(other.text().trim(), " ");
            m.bold(&m.text(&format!("/{ipa}/")))
        }
    };
    let pronunciation = format!("{}: {}", m.bold(label), phonetic);

    let similar = if term.to_lowercase() == "recursion" {
        SourceOutput::Found("recursion".to_string())
    } else {
        match &result.similar {
            SourceOutput::Found(raw) => match format_similar(raw, term) {
                list if list.is_empty() => SourceOutput::Empty,
                list => SourceOutput::Found(list),
            },
            other => other.clone(),
        }
    };
    let heading = m.bold(if found { "Similar Words" } else { "Did you mean" });
    let similar = match similar {
        SourceOutput::Found(list) => Some(format!(
            "{heading}:\n{}",
            m.italic(&m.color(word_color, &m.text(&format!("  {list}"))))
        )),
        SourceOutput::Empty => None,
        SourceOutput::Failed { program } => Some(format!("{heading}:\n{}", unavailable(&program, m))),
    };

    [Some(pronunciation), Some(definition), similar]
        .into_iter()
        .flatten()
        .map(|segment| segment.trim().to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Looks a term up with the external tools and formats the result
pub async fn lookup(
    runner: &dyn ToolRunner,
    dictionary: &DictionaryConfig,
    speech: &SpeechConfig,
    term: &CleanTerm,
    scheme: ColorScheme,
    m: Markup,
) -> MarkupText {
    let result = fetch(runner, dictionary, speech, term.as_str()).await;
    merge(&result, term.as_str(), scheme, m)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use async_trait::async_trait;

    use super::*;
    use crate::error::ToolError;
    use crate::external::ToolOutput;
    use crate::external::testing::ScriptedRunner;
    use crate::preprocess::normalize;
    use crate::types::MarkupFlavor;

    const CAT: &str = "From WordNet (r) 3.1 (2011) [wn]:\n\n  cat\n      n 1: feline mammal\n";

    fn runner_for(term: &str, definition: &str, ipa: &str, similar: &str) -> ScriptedRunner {
        ScriptedRunner::new()
            .reply("dict", &["-d", "wn", "--", term], definition)
            .reply("espeak-ng", &["-ven-uk-rp", "--ipa", "-q", "--", term], ipa)
            .reply("dict", &["-m", "-d", "wn", "-s", "lev", "--", term], similar)
    }

    async fn run(runner: &dyn ToolRunner, raw: &str, flavor: MarkupFlavor) -> String {
        let term = normalize(raw).unwrap();
        lookup(
            runner,
            &DictionaryConfig::default(),
            &SpeechConfig::default(),
            &term,
            ColorScheme::Light,
            Markup::new(flavor),
        )
        .await
    }

    #[tokio::test]
    async fn test_full_lookup_plain() {
        let runner = runner_for("cat", CAT, " kˈat\n", "wn:  \"bat\"  \"cab\"  \"cat\"\n");
        let out = run(&runner, "cat", MarkupFlavor::Plain).await;
        assert_eq!(
            out,
            "Pronunciation: /kˈat/\n\ncat ~ noun\n  1: feline mammal\n\nSimilar Words:\n  bat, cab"
        );
        assert_eq!(runner.call_count(), 3);
    }

    #[tokio::test]
    async fn test_full_lookup_pango() {
        let runner = runner_for("cat", CAT, " kˈat\n", "wn:  \"bat\"\n");
        let out = run(&runner, "cat", MarkupFlavor::Pango).await;
        assert!(out.starts_with("<b>Pronunciation</b>: <b>/kˈat/</b>\n\n<b>cat</b> ~ <i>noun</i>"));
        assert!(out.ends_with("<b>Similar Words</b>:\n<i><span foreground=\"green\">  bat</span></i>"));
    }

    #[tokio::test]
    async fn test_wrapped_ipa_is_collapsed() {
        let runner = runner_for("cat", CAT, " kˈat\n  ənd\n", "");
        let out = run(&runner, "cat", MarkupFlavor::Plain).await;
        assert!(out.starts_with("Pronunciation: /kˈat ənd/\n\n"));
    }

    #[tokio::test]
    async fn test_recursion_is_its_own_similar_word() {
        let runner = runner_for(
            "recursion",
            "  recursion\n      n 1: a formula\n",
            "ɹɪkˈɜːʃən",
            "wn:  \"excursion\"\n",
        );
        let out = run(&runner, "recursion", MarkupFlavor::Plain).await;
        assert!(out.ends_with("Similar Words:\n  recursion"));
        assert!(!out.contains("excursion"));
    }

    #[tokio::test]
    async fn test_recursion_without_match_output() {
        let runner = runner_for("recursion", "  recursion\n      n 1: a formula\n", "", "");
        let out = run(&runner, "recursion", MarkupFlavor::Plain).await;
        assert!(out.ends_with("Similar Words:\n  recursion"));
    }

    #[tokio::test]
    async fn test_definition_not_found() {
        let runner = runner_for("xyzzyqq", "", "zˈɪzi", "");
        let out = run(&runner, "xyzzyqq", MarkupFlavor::Plain).await;
        assert_eq!(
            out,
            "Probable Pronunciation: /zˈɪzi/\n\nCould not find definition for 'xyzzyqq'."
        );
    }

    #[tokio::test]
    async fn test_not_found_offers_corrections() {
        let runner = runner_for("catt", "", "kˈat", "wn:  \"cat\"  \"catty\"\n");
        let out = run(&runner, "catt", MarkupFlavor::Plain).await;
        assert!(out.ends_with("Did you mean:\n  cat, catty"));
    }

    #[tokio::test]
    async fn test_all_tools_missing() {
        let runner = ScriptedRunner::new();
        let out = run(&runner, "cat", MarkupFlavor::Plain).await;
        assert_eq!(
            out,
            "Probable Pronunciation: Could not run 'espeak-ng'. Is it installed?\n\n\
             Could not find definition for 'cat'.\nCould not run 'dict'. Is it installed?\n\n\
             Did you mean:\nCould not run 'dict'. Is it installed?"
        );
    }

    #[tokio::test]
    async fn test_dash_term_is_not_an_option() {
        let runner = ScriptedRunner::new();
        run(&runner, "--help", MarkupFlavor::Plain).await;

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 3);
        for call in calls.iter() {
            let n = call.args.len();
            assert_eq!(call.args[n - 2..], ["--", "--help"], "{call}");
        }
    }

    struct SlowRunner;

    #[async_trait]
    impl ToolRunner for SlowRunner {
        async fn run(&self, _command: &ToolCommand) -> Result<ToolOutput, ToolError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(ToolOutput::ok("x"))
        }
    }

    #[tokio::test]
    async fn test_sources_run_concurrently() {
        let start = Instant::now();
        let result = fetch(
            &SlowRunner,
            &DictionaryConfig::default(),
            &SpeechConfig::default(),
            "cat",
        )
        .await;
        let elapsed = start.elapsed();

        assert!(elapsed < Duration::from_millis(500), "Too slow: {:?}", elapsed);
        assert!(result.definition.is_found());
        assert!(result.pronunciation.is_found());
        assert!(result.similar.is_found());
    }
}
