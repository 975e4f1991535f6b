use kanal::AsyncReceiver;
use reo_types::{AppEvent, Dialog};
use tokio::io::{AsyncWriteExt, Stdout};
use tokio_util::sync::CancellationToken;

const PROMPT: &str = "reo> ";

/// Prints backend replies until the backend asks to stop
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    prompt: bool,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let result = render_loop(app_to_ui_rx, prompt, &cancel).await;
    cancel.cancel();
    result
}

async fn render_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    prompt: bool,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => {
                    tracing::info!("Backend channel closed");
                    break;
                }
            },
        };

        match event {
            AppEvent::ShowDefinition { term, markup } => {
                tracing::debug!("Showing definition of '{}'", term);
                stdout.write_all(markup.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            AppEvent::ShowError(dialog) => {
                stdout.flush().await?;
                eprintln!("{}", format_dialog(&dialog));
            }
            AppEvent::Terminate => {
                tracing::info!("Terminate requested");
                break;
            }
            AppEvent::Idle | AppEvent::BackendReady => {}
            AppEvent::Search(_)
            | AppEvent::InputChanged
            | AppEvent::Speak(_)
            | AppEvent::Random => {
                // Requests for the backend, never sent this way
            }
        }

        if prompt {
            show_prompt(&mut stdout).await?;
        }
    }

    stdout.flush().await?;
    Ok(())
}

async fn show_prompt(stdout: &mut Stdout) -> anyhow::Result<()> {
    stdout.write_all(PROMPT.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Message box as console text
pub fn format_dialog(dialog: &Dialog) -> String {
    let body = dialog
        .secondary
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join(" ");
    if dialog.title == dialog.primary {
        format!("[{}] {}", dialog.title, body)
    } else {
        format!("[{}] {}\n{}", dialog.title, dialog.primary, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_joins_wrapped_lines() {
        let dialog = Dialog::new("Umm..?", "Umm..?", "Reo can't find any text there! You sure \nyou typed something?");
        assert_eq!(
            format_dialog(&dialog),
            "[Umm..?] Reo can't find any text there! You sure you typed something?"
        );
    }

    #[test]
    fn test_dialog_with_primary() {
        let dialog = Dialog::new("Error: Invalid Input!", "Invalid Characters!", "bad");
        assert_eq!(
            format_dialog(&dialog),
            "[Error: Invalid Input!] Invalid Characters!\nbad"
        );
    }
}
