use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tapword_config::Config;
use tapword_types::{BackendEvent, FrontendEvent, PopupBody, PopupView, Rect};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::pipeline_tests::EchoTranslator;
use crate::events::{AppEvent, event_loop};
use crate::services::Services;
use crate::state::AppState;

struct Running {
    app_tx: AsyncSender<AppEvent>,
    outbound_rx: AsyncReceiver<BackendEvent>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
    _dir: tempfile::TempDir,
}

impl Running {
    fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.viewer.storage_path = Some(dir.path().join("viewer.json"));
        config.selection.debounce_ms = 400;

        let services = Services {
            translator: Arc::new(EchoTranslator),
            flashcards: None,
            timeout: Duration::from_secs(5),
        };

        let (app_tx, app_rx) = kanal::unbounded_async();
        let (outbound_tx, outbound_rx) = kanal::unbounded_async();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(event_loop(
            Arc::new(AppState::new(config)),
            services,
            app_rx,
            app_tx.clone(),
            outbound_tx,
            cancel.child_token(),
        ));

        Self {
            app_tx,
            outbound_rx,
            cancel,
            handle,
            _dir: dir,
        }
    }

    async fn send(&self, event: FrontendEvent) {
        self.app_tx.send(AppEvent::Frontend(event)).await.unwrap();
    }

    async fn select(&self, text: &str) {
        self.send(FrontendEvent::Selection {
            text: text.to_string(),
            ranges: vec![Rect::new(40.0, 200.0, 120.0, 18.0)],
        })
        .await;
    }

    async fn next_popup(&self) -> PopupView {
        loop {
            let event = tokio::time::timeout(Duration::from_secs(10), self.outbound_rx.recv())
                .await
                .expect("no popup update")
                .unwrap();
            if let BackendEvent::Popup(view) = event {
                return view;
            }
        }
    }
}

#[tokio::test(start_paused = true)]
async fn release_translates_after_debounce() {
    let running = Running::start();

    let ready = running.outbound_rx.recv().await.unwrap();
    assert_eq!(ready, BackendEvent::Ready);

    running.select("  good   morning  ").await;
    running.send(FrontendEvent::PointerRelease).await;

    let loading = running.next_popup().await;
    assert!(loading.visible);
    assert_eq!(loading.phrase.as_deref(), Some("good morning"));
    assert_eq!(loading.body, PopupBody::Loading);

    let done = running.next_popup().await;
    assert_eq!(
        done.body,
        PopupBody::Translation {
            text: "GOOD MORNING".to_string(),
            flashcard: None,
        }
    );

    running.cancel.cancel();
    running.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn rapid_releases_collapse_into_one_lookup() {
    let running = Running::start();

    running.select("first").await;
    running.send(FrontendEvent::PointerRelease).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    running.select("second").await;
    running.send(FrontendEvent::PointerRelease).await;

    let loading = running.next_popup().await;
    assert_eq!(loading.phrase.as_deref(), Some("second"));
    let done = running.next_popup().await;
    assert_eq!(done.phrase.as_deref(), Some("second"));
    assert!(matches!(done.body, PopupBody::Translation { .. }));

    running.cancel.cancel();
    running.handle.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn empty_release_keeps_popup_hidden() {
    let running = Running::start();

    running.select("word").await;
    running.send(FrontendEvent::PointerRelease).await;
    assert!(running.next_popup().await.visible);
    assert!(running.next_popup().await.visible);

    running.select("   ").await;
    running.send(FrontendEvent::PointerRelease).await;
    assert_eq!(running.next_popup().await, PopupView::hidden());

    running.send(FrontendEvent::Shutdown).await;
    running.handle.await.unwrap().unwrap();
}
