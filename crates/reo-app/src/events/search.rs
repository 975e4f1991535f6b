use kanal::AsyncSender;
use reo_core::pipeline::{Response, SearchReport};
use reo_core::state::LookupSession;
use reo_types::AppEvent;

use crate::state::AppState;

pub async fn handle_search(
    state: &AppState,
    text: String,
    session: LookupSession,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<LookupSession> {
    let report = state
        .pipeline
        .search(&text, state.scheme, state.flavor, session)
        .await;
    reply(report, app_to_ui_tx).await
}

pub async fn handle_random(
    state: &AppState,
    session: LookupSession,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<LookupSession> {
    let report = state
        .pipeline
        .random(state.scheme, state.flavor, session)
        .await;
    reply(report, app_to_ui_tx).await
}

async fn reply(
    report: SearchReport,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<LookupSession> {
    let event = match report.outcome {
        Ok(Response::Show { term, markup }) => AppEvent::ShowDefinition { term, markup },
        Ok(Response::Terminate) => AppEvent::Terminate,
        Ok(Response::Unchanged) => AppEvent::Idle,
        Err(e) => match e.dialog() {
            Some(dialog) => AppEvent::ShowError(dialog),
            None => {
                tracing::debug!("Ignoring search: {}", e);
                AppEvent::Idle
            }
        },
    };
    app_to_ui_tx.send(event).await?;

    Ok(report.session)
}
