use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use reo_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::input_io;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, prompt: bool) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Backend
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Console output, ends the session when it stops
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            prompt,
            self.cancel_token.clone(),
        ));

        // Console input
        tasks.spawn(input_io(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Detect WordNet now so the first banner does not wait on it
        let state = self.state.clone();
        let cancel = self.cancel_token.child_token();
        tasks.spawn(async move {
            tokio::select! {
                version = state.pipeline.wordnet_version() => {
                    tracing::debug!("WordNet {} ready", version);
                }
                _ = cancel.cancelled() => {}
            }
            Ok(())
        });

        tasks
    }

    /// Resolves once the console surface has closed
    pub async fn stopped(&self) {
        self.cancel_token.cancelled().await
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Joins the spawned tasks, aborting whatever is still running after `grace`
pub async fn drain(mut tasks: JoinSet<anyhow::Result<()>>, grace: Duration) {
    let deadline = tokio::time::sleep(grace);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => tracing::error!("Task failed: {:#}", e),
                Some(Err(e)) if e.is_cancelled() => {}
                Some(Err(e)) => tracing::error!("Task panicked: {}", e),
                None => return,
            },
            _ = &mut deadline => {
                tracing::warn!("{} task(s) still running, aborting", tasks.len());
                tasks.abort_all();
                while tasks.join_next().await.is_some() {}
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_aborts_stuck_task() {
        let mut tasks: JoinSet<anyhow::Result<()>> = JoinSet::new();
        tasks.spawn(async { Ok(()) });
        tasks.spawn(async {
            std::future::pending::<()>().await;
            Ok(())
        });

        tokio::time::timeout(Duration::from_secs(1), drain(tasks, Duration::from_millis(50)))
            .await
            .expect("drain should give up on the stuck task");
    }

    #[tokio::test]
    async fn test_drain_waits_for_finishing_tasks() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let mut tasks: JoinSet<anyhow::Result<()>> = JoinSet::new();
        tasks.spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let _ = tx.send(());
            Ok(())
        });

        drain(tasks, Duration::from_secs(5)).await;
        assert!(rx.await.is_ok());
    }
}
