use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use reo_core::state::LookupSession;
use reo_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod search;
pub mod speak;

use search::{handle_random, handle_search};
use speak::handle_speak;

/// Backend loop, owns the lookup session of the search box
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut session = LookupSession::new();
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => {
                    tracing::info!("[EVENT_LOOP] Console channel closed");
                    break;
                }
            },
        };

        tracing::debug!("[EVENT_LOOP] EVENT RECEIVED: {:?}", event);
        let terminate = matches!(event, AppEvent::Terminate);
        session = handle_events(&state, &app_to_ui_tx, session, event).await?;
        if terminate {
            break;
        }
    }

    Ok(())
}

pub async fn handle_events(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    session: LookupSession,
    event: AppEvent,
) -> anyhow::Result<LookupSession> {
    let session = match event {
        AppEvent::Search(text) => handle_search(state, text, session, app_to_ui_tx).await?,
        AppEvent::InputChanged => session.input_changed(),
        AppEvent::Random => handle_random(state, session, app_to_ui_tx).await?,
        AppEvent::Speak(text) => {
            let text = text
                .or_else(|| session.last_term().map(str::to_string))
                .unwrap_or_default();
            handle_speak(state, &text, &session, app_to_ui_tx).await?;
            session
        }
        AppEvent::Terminate => {
            app_to_ui_tx.send(AppEvent::Terminate).await?;
            session
        }
        AppEvent::ShowDefinition { .. }
        | AppEvent::ShowError(_)
        | AppEvent::Idle
        | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
            session
        }
    };

    Ok(session)
}
