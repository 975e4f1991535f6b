use std::sync::Arc;

use reo_config::Config;
use reo_config::dictionary::DictionaryConfig;
use reo_config::extras::ExtrasConfig;
use reo_config::speech::SpeechConfig;
use tokio::sync::OnceCell;

use crate::command::{Command, InterceptContext, Intercepted, intercept};
use crate::custom::CustomDefinitions;
use crate::error::{InputError, SearchError, SpeakError};
use crate::external::ToolRunner;
use crate::lookup::lookup;
use crate::markup::Markup;
use crate::preprocess::normalize;
use crate::random::random_word;
use crate::speech::read_term;
use crate::state::LookupSession;
use crate::types::{ColorScheme, MarkupFlavor, MarkupText};
use crate::wordnet::detect_version;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Same input as the last completed search, nothing was done
    Unchanged,
    Show { term: String, markup: MarkupText },
    /// The user asked to quit
    Terminate,
}

#[derive(Debug)]
pub struct SearchReport {
    pub session: LookupSession,
    pub outcome: Result<Response, SearchError>,
}

/// Normalizer, interceptor, custom definitions and dictionary lookup in order
pub struct Pipeline {
    runner: Arc<dyn ToolRunner>,
    dictionary: DictionaryConfig,
    speech: SpeechConfig,
    extras: ExtrasConfig,
    /// `None` when no folder could be determined, overrides are then skipped
    custom: Option<CustomDefinitions>,
    wordnet_version: OnceCell<String>,
}

impl Pipeline {
    pub fn new(
        runner: Arc<dyn ToolRunner>,
        config: &Config,
        custom: Option<CustomDefinitions>,
    ) -> Self {
        Self {
            runner,
            dictionary: config.dictionary.clone(),
            speech: config.speech.clone(),
            extras: config.extras.clone(),
            custom,
            wordnet_version: OnceCell::new(),
        }
    }

    pub fn custom_definitions(&self) -> Option<&CustomDefinitions> {
        self.custom.as_ref()
    }

    /// Installed WordNet version, detected on first use
    pub async fn wordnet_version(&self) -> &str {
        self.wordnet_version
            .get_or_init(|| detect_version(self.runner.as_ref(), &self.dictionary))
            .await
    }

    pub async fn search(
        &self,
        raw: &str,
        scheme: ColorScheme,
        flavor: MarkupFlavor,
        session: LookupSession,
    ) -> SearchReport {
        let text = raw.trim();
        if session.is_repeat(text) {
            tracing::debug!("'{}' was just searched, skipping", text);
            return SearchReport {
                session,
                outcome: Ok(Response::Unchanged),
            };
        }

        let term = match normalize(raw) {
            Ok(term) => term,
            Err(e) => {
                if e == InputError::InvalidCharacters {
                    tracing::error!("Invalid Characters.");
                }
                return SearchReport {
                    session,
                    outcome: Err(e.into()),
                };
            }
        };
        let m = Markup::new(flavor);

        let intercepted = if Command::parse(term.as_str()).is_some() {
            let ctx = InterceptContext {
                runner: self.runner.as_ref(),
                extras: &self.extras,
                wordnet_version: self.wordnet_version().await,
                scheme,
                markup: m,
            };
            intercept(&term, &ctx).await
        } else {
            None
        };
        match intercepted {
            Some(Intercepted::Terminate) => {
                return SearchReport {
                    session,
                    outcome: Ok(Response::Terminate),
                };
            }
            Some(Intercepted::Show(markup)) => {
                return SearchReport {
                    session: session.completed(text, false),
                    outcome: Ok(Response::Show {
                        term: term.into_inner(),
                        markup,
                    }),
                };
            }
            None => {}
        }

        let resolved = match &self.custom {
            Some(custom) => custom.resolve(&term, scheme, m).await,
            None => Ok(None),
        };
        let markup = match resolved {
            Ok(Some(markup)) => markup,
            Ok(None) => {
                tracing::debug!("No custom definition for '{}', asking dict", term);
                lookup(
                    self.runner.as_ref(),
                    &self.dictionary,
                    &self.speech,
                    &term,
                    scheme,
                    m,
                )
                .await
            }
            Err(e) => {
                tracing::error!("{}", e);
                return SearchReport {
                    session,
                    outcome: Err(e.into()),
                };
            }
        };

        SearchReport {
            session: session.completed(text, true),
            outcome: Ok(Response::Show {
                term: term.into_inner(),
                markup,
            }),
        }
    }

    /// Looks up a random headword as if it had been typed into a fresh search box
    pub async fn random(
        &self,
        scheme: ColorScheme,
        flavor: MarkupFlavor,
        session: LookupSession,
    ) -> SearchReport {
        match random_word(self.runner.as_ref(), &self.dictionary).await {
            Some(word) => {
                tracing::info!("Random word: {}", word);
                self.search(&word, scheme, flavor, session.input_changed())
                    .await
            }
            None => SearchReport {
                session,
                outcome: Err(SearchError::NoRandomWord),
            },
        }
    }

    /// Reads the search box text aloud once it has been looked up
    pub async fn speak(&self, raw: &str, session: &LookupSession) -> Result<(), SpeakError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(SpeakError::NothingEntered);
        }
        if !session.searched() {
            return Err(SpeakError::NotSearched);
        }
        read_term(self.runner.as_ref(), &self.speech, text).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::testing::ScriptedRunner;

    fn pipeline(runner: Arc<ScriptedRunner>, dir: &std::path::Path) -> Pipeline {
        Pipeline::new(runner, &Config::default(), Some(CustomDefinitions::new(dir)))
    }

    async fn search(pipeline: &Pipeline, raw: &str, session: LookupSession) -> SearchReport {
        pipeline
            .search(raw, ColorScheme::Light, MarkupFlavor::Plain, session)
            .await
    }

    #[tokio::test]
    async fn test_empty_input_does_nothing() {
        let runner = Arc::new(ScriptedRunner::new());
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(runner.clone(), dir.path());

        let report = search(&pipeline, "   ", LookupSession::new()).await;
        let err = report.outcome.unwrap_err();
        assert!(matches!(err, SearchError::Input(InputError::Empty)));
        assert!(err.dialog().is_none());
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_input_shows_dialog() {
        let runner = Arc::new(ScriptedRunner::new());
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(runner.clone(), dir.path());

        let report = search(&pipeline, "?!?", LookupSession::new()).await;
        let dialog = report.outcome.unwrap_err().dialog().unwrap();
        assert_eq!(dialog.title, "Error: Invalid Input!");
        assert_eq!(runner.call_count(), 0);
        assert_eq!(report.session, LookupSession::new());
    }

    #[tokio::test]
    async fn test_custom_definition_skips_tools() {
        let runner = Arc::new(ScriptedRunner::new());
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cat"), "meow\n[warninghide]").unwrap();
        let pipeline = pipeline(runner.clone(), dir.path());

        let report = search(&pipeline, "CAT", LookupSession::new()).await;
        assert_eq!(
            report.outcome.unwrap(),
            Response::Show {
                term: "CAT".to_string(),
                markup: "meow".to_string()
            }
        );
        assert_eq!(runner.call_count(), 0);
        assert!(report.session.searched());
    }

    #[tokio::test]
    async fn test_lookup_records_session() {
        let runner = Arc::new(
            ScriptedRunner::new()
                .reply("dict", &["-d", "wn", "--", "cat"], "  cat\n      n 1: feline\n")
                .reply("espeak-ng", &["-ven-uk-rp", "--ipa", "-q", "--", "cat"], "kˈat"),
        );
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(runner.clone(), dir.path());

        let report = search(&pipeline, " cat ", LookupSession::new()).await;
        let Ok(Response::Show { markup, .. }) = report.outcome else {
            panic!("expected a definition");
        };
        assert!(markup.starts_with("Pronunciation: /kˈat/"));
        assert_eq!(report.session.last_term(), Some("cat"));
        assert!(report.session.searched());

        let calls = runner.call_count();
        let again = search(&pipeline, "cat", report.session.clone()).await;
        assert_eq!(again.outcome.unwrap(), Response::Unchanged);
        assert_eq!(runner.call_count(), calls);
    }

    #[tokio::test]
    async fn test_commands_do_not_count_as_searches() {
        let runner = Arc::new(ScriptedRunner::new());
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(runner, dir.path());

        let report = search(&pipeline, "reo", LookupSession::new()).await;
        assert!(matches!(report.outcome, Ok(Response::Show { .. })));
        assert!(!report.session.searched());
        assert_eq!(report.session.last_term(), Some("reo"));
    }

    #[tokio::test]
    async fn test_close_now_terminates() {
        let runner = Arc::new(ScriptedRunner::new());
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(runner, dir.path());

        let report = search(&pipeline, "close now", LookupSession::new()).await;
        assert_eq!(report.outcome.unwrap(), Response::Terminate);
    }

    #[tokio::test]
    async fn test_database_banner_uses_detected_version() {
        let runner = Arc::new(ScriptedRunner::new().reply(
            "dict",
            &["-d", "wn", "--", "test"],
            "From WordNet (r) 3.0 (2006) [wn]:\n",
        ));
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(runner, dir.path());

        let report = search(&pipeline, "00-database-short", LookupSession::new()).await;
        let Ok(Response::Show { markup, .. }) = report.outcome else {
            panic!("expected a banner");
        };
        assert_eq!(markup, " Running Reo with WordNet 3.0");
    }

    #[tokio::test]
    async fn test_speak_requires_search() {
        let runner = Arc::new(ScriptedRunner::new().reply(
            "espeak-ng",
            &["-ven-uk-rp", "-s", "120", "--", "cat"],
            "",
        ));
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(runner.clone(), dir.path());

        let fresh = LookupSession::new();
        assert!(matches!(
            pipeline.speak("  ", &fresh).await,
            Err(SpeakError::NothingEntered)
        ));
        assert!(matches!(
            pipeline.speak("cat", &fresh).await,
            Err(SpeakError::NotSearched)
        ));

        let searched = fresh.completed("cat", true);
        assert!(pipeline.speak("cat", &searched).await.is_ok());
        assert_eq!(runner.call_count(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_custom_definition_fails_lookup() {
        let runner = Arc::new(ScriptedRunner::new());
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("cat")).unwrap();
        let pipeline = pipeline(runner.clone(), dir.path());
        let session = LookupSession::new().completed("dog", true);

        let report = search(&pipeline, "cat", session.clone()).await;
        let err = report.outcome.unwrap_err();
        assert!(matches!(err, SearchError::Override(_)));
        let dialog = err.dialog().unwrap();
        assert_eq!(dialog.title, "Error: Lookup Failed!");
        assert_eq!(runner.call_count(), 0);
        assert_eq!(report.session, session);
    }

    #[tokio::test]
    async fn test_without_custom_folder_asks_dict() {
        let runner = Arc::new(ScriptedRunner::new());
        let pipeline = Pipeline::new(runner.clone(), &Config::default(), None);

        let report = search(&pipeline, "Cargo.toml", LookupSession::new()).await;
        let Ok(Response::Show { markup, .. }) = report.outcome else {
            panic!("expected a lookup");
        };
        assert!(markup.contains("Could not find definition for 'Cargo.toml'."));
        assert_eq!(runner.call_count(), 3);
        assert!(pipeline.custom_definitions().is_none());
    }

    #[tokio::test]
    async fn test_random_word_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("words");
        std::fs::write(&list, "cat\n").unwrap();
        std::fs::write(dir.path().join("cat"), "meow\n[warninghide]").unwrap();

        let mut config = Config::default();
        config.dictionary.word_list = Some(list.to_string_lossy().into_owned());
        let runner = Arc::new(ScriptedRunner::new());
        let pipeline = Pipeline::new(
            runner.clone(),
            &config,
            Some(CustomDefinitions::new(dir.path())),
        );

        // The same word again still counts, a random pick is a fresh input
        let session = LookupSession::new().completed("cat", true);
        let report = pipeline
            .random(ColorScheme::Light, MarkupFlavor::Plain, session)
            .await;
        assert_eq!(
            report.outcome.unwrap(),
            Response::Show {
                term: "cat".to_string(),
                markup: "meow".to_string()
            }
        );
        assert_eq!(report.session.last_term(), Some("cat"));
        assert!(report.session.searched());
    }

    #[tokio::test]
    async fn test_random_word_unavailable() {
        let runner = Arc::new(ScriptedRunner::new());
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline(runner, dir.path());

        let report = pipeline
            .random(ColorScheme::Light, MarkupFlavor::Plain, LookupSession::new())
            .await;
        let err = report.outcome.unwrap_err();
        assert!(matches!(err, SearchError::NoRandomWord));
        assert_eq!(err.dialog().unwrap().primary, "No random word!");
    }
}
