//! Client-side flashcard creation through AnkiConnect.

mod client;
mod note;
mod template;

pub use client::AnkiConnectClient;
pub use note::{Note, NoteFields, NoteOptions};
pub use template::CardTemplate;

/// Store a phrase and its translation as a new note
pub async fn add_card(
    client: &AnkiConnectClient,
    template: &CardTemplate,
    phrase: &str,
    translation: &str,
) -> anyhow::Result<u64> {
    client.add_note(&template.note(phrase, translation)).await
}
