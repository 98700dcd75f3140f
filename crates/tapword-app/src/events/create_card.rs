use tapword_core::RequestTag;
use tapword_translator::SideEffectStatus;

use super::{AppEvent, Pipeline};
use crate::services::Flashcards;

impl Pipeline {
    pub(crate) fn spawn_card_creation(
        &self,
        flashcards: Flashcards,
        tag: RequestTag,
        phrase: String,
        translation: String,
    ) {
        let tx = self.app_tx.clone();

        tokio::spawn(async move {
            let status = add_phrase_card(&flashcards, &phrase, &translation).await;
            if let Err(e) = tx.send(AppEvent::FlashcardDone { tag, status }).await {
                tracing::debug!("Flashcard result dropped: {e}");
            }
        });
    }
}

pub async fn add_phrase_card(
    flashcards: &Flashcards,
    phrase: &str,
    translation: &str,
) -> SideEffectStatus {
    match tapword_anki::add_card(&flashcards.client, &flashcards.template, phrase, translation)
        .await
    {
        Ok(note_id) => {
            tracing::info!("Added card to Anki: note_id={}", note_id);
            SideEffectStatus::added(Some(note_id))
        }
        Err(e) => {
            tracing::error!("Failed to add card to Anki: {:#}", e);
            SideEffectStatus::failed(e.root_cause().to_string())
        }
    }
}
