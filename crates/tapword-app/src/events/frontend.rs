use std::ops::ControlFlow;

use tapword_core::{SelectionSnapshot, SelectionSource};
use tapword_types::{FrontendEvent, Point, Size};

use super::Pipeline;

impl Pipeline {
    pub(crate) async fn handle_frontend(
        &mut self,
        event: FrontendEvent,
    ) -> anyhow::Result<ControlFlow<()>> {
        match event {
            FrontendEvent::Selection { text, ranges } => {
                self.selection.update(SelectionSnapshot::new(text, ranges));
                return Ok(ControlFlow::Continue(()));
            }
            FrontendEvent::PointerRelease => {
                self.tracker.on_release();
                return Ok(ControlFlow::Continue(()));
            }
            FrontendEvent::PointerDown { x, y } => {
                let selection_empty = self.selection.snapshot().is_empty();
                if self
                    .presenter
                    .on_pointer_down(Point::new(x, y), selection_empty)
                {
                    tracing::debug!("Popup dismissed by outside pointer-down");
                }
            }
            FrontendEvent::Close => self.presenter.close(),
            FrontendEvent::Retry => {
                if let Some(dispatch) = self.presenter.retry() {
                    self.spawn_translation(dispatch);
                }
            }
            FrontendEvent::Viewport { width, height } => {
                self.presenter.set_viewport(Size::new(width, height));
                self.presenter.layout();
            }
            FrontendEvent::PopupSize { width, height } => {
                self.presenter.set_popup_size(Size::new(width, height));
                self.presenter.layout();
            }
            FrontendEvent::Shutdown => return Ok(ControlFlow::Break(())),
            viewer_event => {
                self.handle_viewer(viewer_event);
                self.publish_viewer().await?;
            }
        }

        self.publish_popup().await?;
        Ok(ControlFlow::Continue(()))
    }

    /// Page and document changes re-render the text layer, so any popup
    /// anchored to the old one is dropped.
    fn handle_viewer(&mut self, event: FrontendEvent) {
        match event {
            FrontendEvent::OpenDocument { source } => self.viewer.open(source),
            FrontendEvent::DocumentLoaded { page_count } => {
                self.viewer.on_loaded(page_count);
                return;
            }
            FrontendEvent::DocumentError { message } => {
                self.viewer.on_load_error(message);
                return;
            }
            FrontendEvent::GoToPage { page } => self.viewer.go_to(page),
            FrontendEvent::NextPage => self.viewer.next_page(),
            FrontendEvent::PrevPage => self.viewer.prev_page(),
            FrontendEvent::ZoomIn => self.viewer.zoom_in(),
            FrontendEvent::ZoomOut => self.viewer.zoom_out(),
            other => {
                tracing::warn!("Unhandled frontend event: {other:?}");
                return;
            }
        }

        self.presenter.hide();
    }
}
