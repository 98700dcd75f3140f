use std::sync::Arc;

use tapword_config::popup::PopupConfig;
use tapword_translator::SideEffectStatus;
use tapword_types::{
    FlashcardBadge, HapticKind, Placement, Point, PopupBody, PopupView, SelectedPhrase, Size,
};

use crate::host::HostPlatform;
use crate::placement::{place, resize};
use crate::session::{Dispatch, Outcome, RequestState, RequestTag, TranslationSession};

/// Transient popup bound to one phrase. Owns the translation session for as
/// long as it is visible.
pub struct PopupPresenter {
    session: TranslationSession,
    config: PopupConfig,
    host: Arc<dyn HostPlatform>,
    phrase: Option<SelectedPhrase>,
    shown: bool,
    viewport: Option<Size>,
    popup_size: Option<Size>,
    placement: Option<Placement>,
    needs_layout: bool,
}

impl PopupPresenter {
    pub fn new(
        session: TranslationSession,
        config: PopupConfig,
        host: Arc<dyn HostPlatform>,
    ) -> Self {
        Self {
            session,
            config,
            host,
            phrase: None,
            shown: false,
            viewport: None,
            popup_size: None,
            placement: None,
            needs_layout: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.shown && self.phrase.as_ref().is_some_and(|p| !p.is_empty())
    }

    pub fn session(&self) -> &TranslationSession {
        &self.session
    }

    pub fn phrase(&self) -> Option<&SelectedPhrase> {
        self.phrase.as_ref()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Bind a new phrase and arm its translation
    pub fn show(&mut self, phrase: SelectedPhrase) -> Option<Dispatch> {
        if phrase.is_empty() {
            self.hide();
            return None;
        }

        tracing::debug!("Showing popup for {:?}", phrase.text);
        let text = phrase.text.clone();
        self.phrase = Some(phrase);
        self.shown = true;
        self.placement = None;
        self.needs_layout = true;
        self.host.haptic(HapticKind::Selection);

        self.session.bind(Some(text))
    }

    /// Hide and drop all translation state
    pub fn hide(&mut self) {
        if self.is_visible() {
            tracing::debug!("Hiding popup");
        }
        self.shown = false;
        self.phrase = None;
        self.placement = None;
        self.needs_layout = false;
        self.session.clear();
    }

    /// Explicit close affordance; ignores the live selection
    pub fn close(&mut self) {
        if self.is_visible() {
            self.host.haptic(HapticKind::Dismiss);
        }
        self.hide();
    }

    /// Pointer-down anywhere. Closes when outside the popup and nothing is
    /// selected; returns whether it closed.
    pub fn on_pointer_down(&mut self, point: Point, selection_empty: bool) -> bool {
        if !self.is_visible() {
            return false;
        }

        if self.placement.is_some_and(|p| p.bounds.contains(point)) {
            return false;
        }

        if !selection_empty {
            return false;
        }

        self.close();
        true
    }

    pub fn retry(&mut self) -> Option<Dispatch> {
        if !self.is_visible() {
            return None;
        }
        self.session.retry()
    }

    pub fn complete(&mut self, tag: RequestTag, outcome: Outcome) -> bool {
        let applied = self.session.complete(tag, outcome);
        if applied {
            match self.session.state() {
                RequestState::Succeeded(_) => self.host.haptic(HapticKind::Success),
                RequestState::Failed(_) => self.host.haptic(HapticKind::Error),
                _ => {}
            }
        }
        applied
    }

    pub fn record_side_effect(&mut self, tag: RequestTag, status: SideEffectStatus) -> bool {
        self.session.record_side_effect(tag, status)
    }

    /// Viewport changes count as a position change
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport != Some(viewport) {
            self.viewport = Some(viewport);
            self.needs_layout = self.shown;
        }
    }

    /// Measured popup size. A settled placement keeps its side and anchor and
    /// only has its box resized; the overflow adjustment is not re-run.
    pub fn set_popup_size(&mut self, size: Size) {
        if self.popup_size == Some(size) {
            return;
        }
        self.popup_size = Some(size);

        if self.needs_layout || size.is_empty() {
            return;
        }
        if let Some(placement) = self.placement {
            self.placement = Some(resize(placement, size));
        }
    }

    /// Run the viewport adjustment if a show or position change is pending.
    /// Returns the realised placement.
    pub fn layout(&mut self) -> Option<Placement> {
        if !self.needs_layout {
            return self.placement;
        }

        let (Some(phrase), Some(popup), Some(viewport)) =
            (self.phrase.as_ref(), self.popup_size, self.viewport)
        else {
            return self.placement;
        };

        if popup.is_empty() {
            return self.placement;
        }

        let placement = place(
            phrase.anchor,
            phrase.bounds,
            popup,
            viewport,
            self.config.margin,
            self.config.gap,
        );
        tracing::debug!("Popup placed {:?} at {:?}", placement.side, placement.bounds);

        self.placement = Some(placement);
        self.needs_layout = false;
        self.placement
    }

    pub fn body(&self) -> PopupBody {
        match self.session.state() {
            RequestState::Idle => PopupBody::Placeholder,
            RequestState::Pending => PopupBody::Loading,
            RequestState::Failed(message) => PopupBody::Error {
                message: message.clone(),
            },
            RequestState::Succeeded(result) => PopupBody::Translation {
                text: result.translated_text.clone(),
                flashcard: self.session.side_effect().map(badge),
            },
        }
    }

    pub fn view(&self) -> PopupView {
        if !self.is_visible() {
            return PopupView::hidden();
        }

        PopupView {
            visible: true,
            phrase: self.phrase.as_ref().map(|p| p.text.clone()),
            body: self.body(),
            placement: self.placement,
            theme: self.host.theme(),
        }
    }
}

fn badge(status: &SideEffectStatus) -> FlashcardBadge {
    FlashcardBadge {
        added: status.succeeded,
        note_id: status.reference_id,
        message: status.error_message.clone(),
    }
}
