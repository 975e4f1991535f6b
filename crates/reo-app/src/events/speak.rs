use kanal::AsyncSender;
use reo_core::error::SpeakError;
use reo_core::state::LookupSession;
use reo_types::AppEvent;

use crate::state::AppState;

pub async fn handle_speak(
    state: &AppState,
    text: &str,
    session: &LookupSession,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let reply = match state.pipeline.speak(text, session).await {
        Ok(()) => AppEvent::Idle,
        Err(e) => {
            if let SpeakError::Tool(err) = &e {
                tracing::error!("Read aloud failed: {}", err);
            }
            AppEvent::ShowError(e.dialog())
        }
    };
    app_to_ui_tx.send(reply).await?;
    Ok(())
}
