use std::io::BufRead;

use kanal::AsyncSender;
use reo_core::preprocess::flatten;
use reo_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Console command that reads the current search text aloud
pub const SPEAK_COMMAND: &str = ":speak";
/// Console command that looks up a random headword
pub const RANDOM_COMMAND: &str = ":random";

/// What one line typed at the console asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Search(String),
    Speak,
    Random,
}

pub fn parse_line(line: &str) -> ConsoleInput {
    match line.trim() {
        SPEAK_COMMAND => ConsoleInput::Speak,
        RANDOM_COMMAND => ConsoleInput::Random,
        _ => ConsoleInput::Search(flatten(line)),
    }
}

/// Turns console lines into backend events, tracking the search box text
#[derive(Debug, Default)]
pub struct SearchBox {
    text: String,
    /// The backend put a random word in the box, only it knows the text
    filled_by_backend: bool,
}

impl SearchBox {
    pub fn events_for(&mut self, line: &str) -> Vec<AppEvent> {
        match parse_line(line) {
            ConsoleInput::Speak => {
                let text = (!self.filled_by_backend).then(|| self.text.clone());
                vec![AppEvent::Speak(text)]
            }
            ConsoleInput::Random => {
                self.text.clear();
                self.filled_by_backend = true;
                vec![AppEvent::Random]
            }
            ConsoleInput::Search(text) => {
                let mut events = Vec::with_capacity(2);
                if self.filled_by_backend || text != self.text {
                    events.push(AppEvent::InputChanged);
                    self.text = text.clone();
                    self.filled_by_backend = false;
                }
                events.push(AppEvent::Search(text));
                events
            }
        }
    }
}

/// Reads stdin lines and forwards them to the backend
pub async fn input_io(ui_to_app_tx: AsyncSender<AppEvent>, cancel: CancellationToken) -> anyhow::Result<()> {
    // Zero capacity so no line is left queued when stdin hits EOF
    let (line_tx, line_rx) = kanal::bounded::<String>(0);
    let line_rx = line_rx.to_async();

    // Plain thread so a pending read never holds up runtime shutdown
    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
            tracing::debug!("stdin reader stopping");
        })?;

    let mut search_box = SearchBox::default();
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            line = line_rx.recv() => line,
        };

        let Ok(line) = line else {
            tracing::info!("stdin closed");
            ui_to_app_tx.send(AppEvent::Terminate).await?;
            return Ok(());
        };

        for event in search_box.events_for(&line) {
            ui_to_app_tx.send(event).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(events: &[AppEvent]) -> Vec<String> {
        events
            .iter()
            .map(|event| match event {
                AppEvent::Search(text) => format!("search:{text}"),
                AppEvent::Speak(Some(text)) => format!("speak:{text}"),
                AppEvent::Speak(None) => "speak".to_string(),
                AppEvent::Random => "random".to_string(),
                AppEvent::InputChanged => "changed".to_string(),
                other => format!("{other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  :speak "), ConsoleInput::Speak);
        assert_eq!(parse_line(":random"), ConsoleInput::Random);
        assert_eq!(parse_line("cat"), ConsoleInput::Search("cat".to_string()));
    }

    #[test]
    fn test_repeat_line_does_not_change_input() {
        let mut search_box = SearchBox::default();
        assert_eq!(names(&search_box.events_for("cat")), ["changed", "search:cat"]);
        assert_eq!(names(&search_box.events_for("cat")), ["search:cat"]);
        assert_eq!(names(&search_box.events_for("dog")), ["changed", "search:dog"]);
    }

    #[test]
    fn test_speak_uses_current_text() {
        let mut search_box = SearchBox::default();
        assert_eq!(names(&search_box.events_for(":speak")), ["speak:"]);
        search_box.events_for("cat");
        assert_eq!(names(&search_box.events_for(":speak")), ["speak:cat"]);
    }

    #[test]
    fn test_random_hands_the_box_to_the_backend() {
        let mut search_box = SearchBox::default();
        search_box.events_for("cat");
        assert_eq!(names(&search_box.events_for(":random")), ["random"]);
        assert_eq!(names(&search_box.events_for(":speak")), ["speak"]);
        // Typing the old text again is a change after a random pick
        assert_eq!(names(&search_box.events_for("cat")), ["changed", "search:cat"]);
    }
}
