use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use tapword_config::selection::SelectionConfig;
use tapword_types::{Rect, SelectedPhrase};
use tokio_util::sync::CancellationToken;
use unicode_normalization::UnicodeNormalization;

/// Point-in-time read of the platform's text selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSnapshot {
    pub text: String,
    /// Client rectangles of each selected range, in document order
    pub ranges: Vec<Rect>,
}

impl SelectionSnapshot {
    pub fn new(text: impl Into<String>, ranges: Vec<Rect>) -> Self {
        Self {
            text: text.into(),
            ranges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Synchronous read of the live selection
pub trait SelectionSource: Send + Sync + 'static {
    fn snapshot(&self) -> SelectionSnapshot;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionSignal {
    Phrase(SelectedPhrase),
    Cleared,
}

/// Build a phrase from a selection: at most `max_words` whitespace-separated
/// tokens joined by single spaces, positioned on the first range.
pub fn phrase_from_snapshot(
    snapshot: &SelectionSnapshot,
    max_words: usize,
) -> Option<SelectedPhrase> {
    // PDF text layers often carry ligatures and full-width forms
    let normalized: String = snapshot.text.nfkc().collect();

    let text = normalized
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() {
        return None;
    }

    let bounds = snapshot.ranges.first().copied().unwrap_or_default();
    Some(SelectedPhrase::new(text, bounds))
}

/// Debounces pointer/touch releases and emits one signal per settled selection
pub struct SelectionTracker<S: SelectionSource> {
    source: Arc<S>,
    delay: Duration,
    max_words: usize,
    signals: AsyncSender<SelectionSignal>,
    lifetime: CancellationToken,
    pending: Option<CancellationToken>,
}

impl<S: SelectionSource> SelectionTracker<S> {
    pub fn new(
        source: Arc<S>,
        config: &SelectionConfig,
        signals: AsyncSender<SelectionSignal>,
    ) -> Self {
        Self {
            source,
            delay: Duration::from_millis(config.debounce_ms),
            max_words: config.max_words,
            signals,
            lifetime: CancellationToken::new(),
            pending: None,
        }
    }

    /// Pointer-up or touch-end on the document. Supersedes any pending read.
    pub fn on_release(&mut self) {
        if self.lifetime.is_cancelled() {
            tracing::debug!("Selection release after teardown ignored");
            return;
        }

        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }

        let token = self.lifetime.child_token();
        self.pending = Some(token.clone());

        let source = Arc::clone(&self.source);
        let signals = self.signals.clone();
        let delay = self.delay;
        let max_words = self.max_words;

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let snapshot = source.snapshot();
                    let signal = match phrase_from_snapshot(&snapshot, max_words) {
                        Some(phrase) => SelectionSignal::Phrase(phrase),
                        None => SelectionSignal::Cleared,
                    };

                    if token.is_cancelled() {
                        return;
                    }

                    tracing::debug!("Selection settled: {:?}", signal);
                    if let Err(e) = signals.send(signal).await {
                        tracing::debug!("Selection signal dropped: {e}");
                    }
                }
            }
        });
    }

    /// Cancel any pending read; nothing is emitted afterwards
    pub fn teardown(&mut self) {
        self.lifetime.cancel();
        self.pending = None;
    }

    pub fn is_torn_down(&self) -> bool {
        self.lifetime.is_cancelled()
    }
}

impl<S: SelectionSource> Drop for SelectionTracker<S> {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::time::timeout;

    use super::*;

    #[derive(Default)]
    struct FakeSelection {
        current: Mutex<SelectionSnapshot>,
    }

    impl FakeSelection {
        fn set(&self, text: &str) {
            *self.current.lock().unwrap() =
                SelectionSnapshot::new(text, vec![Rect::new(100.0, 200.0, 60.0, 14.0)]);
        }
    }

    impl SelectionSource for FakeSelection {
        fn snapshot(&self) -> SelectionSnapshot {
            self.current.lock().unwrap().clone()
        }
    }

    fn make_tracker(
        source: Arc<FakeSelection>,
    ) -> (
        SelectionTracker<FakeSelection>,
        kanal::AsyncReceiver<SelectionSignal>,
    ) {
        let (tx, rx) = kanal::unbounded_async();
        let config = SelectionConfig {
            debounce_ms: 400,
            max_words: 10,
        };
        (SelectionTracker::new(source, &config, tx), rx)
    }

    #[test]
    fn long_selection_keeps_first_ten_words() {
        let snapshot = SelectionSnapshot::new(
            "one two  three\nfour five six seven eight nine ten eleven twelve",
            vec![],
        );
        let phrase = phrase_from_snapshot(&snapshot, 10).unwrap();
        assert_eq!(phrase.text, "one two three four five six seven eight nine ten");
    }

    #[test]
    fn whitespace_only_selection_yields_nothing() {
        for text in ["", "   ", "\n\t "] {
            assert_eq!(phrase_from_snapshot(&SelectionSnapshot::new(text, vec![]), 10), None);
        }
    }

    #[test]
    fn first_range_positions_the_phrase() {
        let snapshot = SelectionSnapshot::new(
            "split selection",
            vec![
                Rect::new(10.0, 40.0, 100.0, 12.0),
                Rect::new(0.0, 60.0, 50.0, 12.0),
            ],
        );
        let phrase = phrase_from_snapshot(&snapshot, 10).unwrap();
        assert_eq!(phrase.anchor.x, 60.0);
        assert_eq!(phrase.anchor.y, 40.0);
        assert_eq!(phrase.bounds, Rect::new(10.0, 40.0, 100.0, 12.0));
    }

    #[test]
    fn ligatures_are_normalized() {
        let snapshot = SelectionSnapshot::new("\u{FB01}nal", vec![]);
        assert_eq!(phrase_from_snapshot(&snapshot, 10).unwrap().text, "final");
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_releases_emit_once() {
        let source = Arc::new(FakeSelection::default());
        let (mut tracker, rx) = make_tracker(source.clone());

        source.set("first");
        tracker.on_release();
        tokio::time::sleep(Duration::from_millis(100)).await;
        source.set("second");
        tracker.on_release();
        tokio::time::sleep(Duration::from_millis(100)).await;
        source.set("third attempt");
        tracker.on_release();

        let signal = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("no signal")
            .unwrap();
        match signal {
            SelectionSignal::Phrase(phrase) => assert_eq!(phrase.text, "third attempt"),
            other => panic!("unexpected signal: {other:?}"),
        }

        assert!(timeout(Duration::from_secs(2), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_selection_signals_cleared() {
        let source = Arc::new(FakeSelection::default());
        let (mut tracker, rx) = make_tracker(source.clone());

        source.set("   ");
        tracker.on_release();

        let signal = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("no signal")
            .unwrap();
        assert_eq!(signal, SelectionSignal::Cleared);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_debounce_before_reading() {
        let source = Arc::new(FakeSelection::default());
        let (mut tracker, rx) = make_tracker(source.clone());

        source.set("early");
        tracker.on_release();
        assert!(timeout(Duration::from_millis(300), rx.recv()).await.is_err());

        // the read happens when the timer fires, not at release time
        source.set("settled");
        let signal = timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("no signal")
            .unwrap();
        assert!(matches!(signal, SelectionSignal::Phrase(p) if p.text == "settled"));
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_timer() {
        let source = Arc::new(FakeSelection::default());
        let (mut tracker, rx) = make_tracker(source.clone());

        source.set("never shown");
        tracker.on_release();
        tracker.teardown();
        tracker.on_release();

        assert!(tracker.is_torn_down());
        assert!(timeout(Duration::from_secs(2), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_timer() {
        let source = Arc::new(FakeSelection::default());
        let (mut tracker, rx) = make_tracker(source.clone());

        source.set("never shown");
        tracker.on_release();
        drop(tracker);

        let received = timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(!matches!(received, Ok(Ok(_))));
    }
}
