use std::sync::Arc;

use tapword_core::session::dispatch;
use tapword_core::{Dispatch, Outcome, RequestState, RequestTag};

use super::{AppEvent, Pipeline};

impl Pipeline {
    /// Run the request off the loop; the completion comes back tagged
    pub(crate) fn spawn_translation(&self, job: Dispatch) {
        let translator = Arc::clone(&self.services.translator);
        let timeout = self.services.timeout;
        let tx = self.app_tx.clone();

        tokio::spawn(async move {
            let outcome = dispatch(translator.as_ref(), &job.request, timeout).await;
            if let Err(e) = tx
                .send(AppEvent::TranslationDone {
                    tag: job.tag,
                    outcome,
                })
                .await
            {
                tracing::debug!("Translation result for {} dropped: {e}", job.tag);
            }
        });
    }

    pub(crate) fn handle_translation_done(&mut self, tag: RequestTag, outcome: Outcome) {
        if !self.presenter.complete(tag, outcome) {
            return;
        }

        let RequestState::Succeeded(result) = self.presenter.session().state() else {
            return;
        };

        if let (Some(flashcards), Some(phrase)) =
            (&self.services.flashcards, self.presenter.session().phrase())
        {
            self.spawn_card_creation(
                flashcards.clone(),
                tag,
                phrase.to_string(),
                result.translated_text.clone(),
            );
        }
    }
}
