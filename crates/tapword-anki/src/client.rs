use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::note::Note;

const ANKI_CONNECT_VERSION: u32 = 6;

/// Thin AnkiConnect JSON-RPC client
#[derive(Clone)]
pub struct AnkiConnectClient {
    url: String,
    http: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// AnkiConnect API version; doubles as a reachability probe
    pub async fn version(&self) -> Result<u32> {
        self.call("version", serde_json::Value::Object(Default::default()))
            .await
    }

    /// Returns the id of the created note
    pub async fn add_note(&self, note: &Note) -> Result<u64> {
        #[derive(Serialize)]
        struct Params<'a> {
            note: &'a Note,
        }

        self.call("addNote", Params { note })
            .await
            .with_context(|| format!("Could not add note to deck {:?}", note.deck_name))
    }

    async fn call<P, T>(&self, action: &str, params: P) -> Result<T>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!("AnkiConnect {action} -> {}", self.url);

        let envelope = Envelope {
            action,
            version: ANKI_CONNECT_VERSION,
            params,
        };

        let reply: Reply<T> = self
            .http
            .post(&self.url)
            .json(&envelope)
            .send()
            .await
            .context("AnkiConnect is not reachable")?
            .json()
            .await
            .context("AnkiConnect sent an unreadable reply")?;

        reply.into_result()
    }
}

#[derive(Serialize)]
struct Envelope<'a, P> {
    action: &'a str,
    version: u32,
    params: P,
}

#[derive(Deserialize)]
struct Reply<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> Reply<T> {
    fn into_result(self) -> Result<T> {
        match (self.result, self.error) {
            (_, Some(error)) => anyhow::bail!("{error}"),
            (Some(result), None) => Ok(result),
            (None, None) => anyhow::bail!("AnkiConnect returned null result"),
        }
    }
}
