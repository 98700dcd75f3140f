use std::ops::ControlFlow;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tapword_config::Config;
use tapword_core::host::select_host;
use tapword_core::viewer::BridgeRenderer;
use tapword_core::{
    Outcome, PopupPresenter, RequestTag, SelectionSignal, SelectionTracker, TranslationSession,
    Viewer, ViewerStore,
};
use tapword_translator::SideEffectStatus;
use tapword_types::{BackendEvent, FrontendEvent, PopupView};
use tokio_util::sync::CancellationToken;

use crate::services::Services;
use crate::state::{AppState, SharedSelection};

pub mod create_card;
pub mod frontend;
pub mod translate;

#[derive(Debug)]
pub enum AppEvent {
    Frontend(FrontendEvent),
    Selection(SelectionSignal),
    TranslationDone {
        tag: RequestTag,
        outcome: Outcome,
    },
    FlashcardDone {
        tag: RequestTag,
        status: SideEffectStatus,
    },
}

/// Everything the event loop owns: popup, selection tracking, viewer
pub struct Pipeline {
    presenter: PopupPresenter,
    tracker: SelectionTracker<SharedSelection>,
    viewer: Viewer<BridgeRenderer>,
    selection: Arc<SharedSelection>,
    services: Services,
    app_tx: AsyncSender<AppEvent>,
    outbound: AsyncSender<BackendEvent>,
    last_popup: Option<PopupView>,
}

impl Pipeline {
    pub fn new(
        config: &Config,
        selection: Arc<SharedSelection>,
        services: Services,
        app_tx: AsyncSender<AppEvent>,
        selection_tx: AsyncSender<SelectionSignal>,
        outbound: AsyncSender<BackendEvent>,
    ) -> Self {
        let host = select_host(&config.host, outbound.clone());
        let presenter = PopupPresenter::new(
            TranslationSession::from_config(&config.translator),
            config.popup.clone(),
            host,
        );

        let tracker = SelectionTracker::new(selection.clone(), &config.selection, selection_tx);

        let store = match &config.viewer.storage_path {
            Some(path) => ViewerStore::open_or_empty(path),
            None => match ViewerStore::default_path() {
                Ok(path) => ViewerStore::open_or_empty(&path),
                Err(e) => {
                    tracing::warn!("Viewer state will not persist: {e}");
                    ViewerStore::ephemeral()
                }
            },
        };
        let viewer = Viewer::new(
            BridgeRenderer::new(),
            config.viewer.clone(),
            store,
        );

        Self {
            presenter,
            tracker,
            viewer,
            selection,
            services,
            app_tx,
            outbound,
            last_popup: None,
        }
    }

    pub fn presenter(&self) -> &PopupPresenter {
        &self.presenter
    }

    pub async fn handle(&mut self, event: AppEvent) -> anyhow::Result<ControlFlow<()>> {
        match event {
            AppEvent::Frontend(event) => return self.handle_frontend(event).await,
            AppEvent::Selection(SelectionSignal::Phrase(phrase)) => {
                if let Some(dispatch) = self.presenter.show(phrase) {
                    self.spawn_translation(dispatch);
                }
                self.presenter.layout();
            }
            AppEvent::Selection(SelectionSignal::Cleared) => {
                self.presenter.hide();
            }
            AppEvent::TranslationDone { tag, outcome } => {
                self.handle_translation_done(tag, outcome);
            }
            AppEvent::FlashcardDone { tag, status } => {
                if !self.presenter.record_side_effect(tag, status) {
                    tracing::debug!("Flashcard result for {tag} arrived after popup moved on");
                }
            }
        }

        self.publish_popup().await?;
        Ok(ControlFlow::Continue(()))
    }

    /// Send the popup view if it changed since the last send
    pub async fn publish_popup(&mut self) -> anyhow::Result<()> {
        let view = self.presenter.view();
        if self.last_popup.as_ref() == Some(&view) {
            return Ok(());
        }

        self.outbound.send(BackendEvent::Popup(view.clone())).await?;
        self.last_popup = Some(view);
        Ok(())
    }

    /// Forward queued renderer commands, then the viewer state
    pub async fn publish_viewer(&mut self) -> anyhow::Result<()> {
        for command in self.viewer.renderer_mut().take_commands() {
            self.outbound.send(command).await?;
        }
        self.outbound
            .send(BackendEvent::Viewer(self.viewer.view()))
            .await?;
        Ok(())
    }

    pub fn teardown(&mut self) {
        self.tracker.teardown();
        self.presenter.hide();
    }
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    services: Services,
    app_rx: AsyncReceiver<AppEvent>,
    app_tx: AsyncSender<AppEvent>,
    outbound: AsyncSender<BackendEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (selection_tx, selection_rx) = kanal::bounded_async(16);

    let mut pipeline = {
        let config = state.config.read().await;
        Pipeline::new(
            &config,
            state.selection.clone(),
            services,
            app_tx,
            selection_tx,
            outbound.clone(),
        )
    };

    outbound.send(BackendEvent::Ready).await?;
    pipeline.publish_viewer().await?;

    tracing::info!("[EVENT_LOOP] Waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = app_rx.recv() => event?,
            signal = selection_rx.recv() => AppEvent::Selection(signal?),
        };

        tracing::trace!("[EVENT_LOOP] {:?}", event);
        if pipeline.handle(event).await?.is_break() {
            tracing::info!("[EVENT_LOOP] Shutdown requested by frontend");
            break;
        }
    }

    pipeline.teardown();
    Ok(())
}
