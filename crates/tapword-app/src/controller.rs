use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tapword_types::{BackendEvent, FrontendEvent};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{AppEvent, event_loop};
use crate::io::{read_frontend, write_backend};
use crate::services::Services;
use crate::state::AppState;

/// Queues between the bridge tasks and the event loop
pub struct ChannelSet {
    pub app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub outbound: (AsyncSender<BackendEvent>, AsyncReceiver<BackendEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app: kanal::bounded_async(256),
            outbound: kanal::bounded_async(128),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the long-running tasks and their shared cancellation
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

    pub async fn spawn_tasks(
        &self,
        services: Services,
        document: Option<String>,
    ) -> anyhow::Result<JoinSet<anyhow::Result<()>>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            services,
            self.channels.app.1.clone(),
            self.channels.app.0.clone(),
            self.channels.outbound.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Frontend -> app
        tasks.spawn(read_frontend(
            tokio::io::BufReader::new(tokio::io::stdin()),
            self.channels.app.0.clone(),
            self.cancel_token.child_token(),
        ));

        // App -> frontend
        tasks.spawn(write_backend(
            tokio::io::stdout(),
            self.channels.outbound.1.clone(),
        ));

        if let Some(source) = document {
            self.channels
                .app
                .0
                .send(AppEvent::Frontend(FrontendEvent::OpenDocument { source }))
                .await?;
        }

        Ok(tasks)
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
