//! JSON-lines bridge to the rendering frontend.

use kanal::{AsyncReceiver, AsyncSender};
use tapword_types::{BackendEvent, FrontendEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::events::AppEvent;

/// Forward frontend messages, one JSON object per line. End of input is
/// treated as a shutdown request.
pub async fn read_frontend<R>(
    reader: R,
    app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::info!("Frontend closed its input");
            app_tx
                .send(AppEvent::Frontend(FrontendEvent::Shutdown))
                .await?;
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<FrontendEvent>(&line) {
            Ok(event) => app_tx.send(AppEvent::Frontend(event)).await?,
            Err(e) => tracing::warn!("Ignoring malformed frontend message: {e}"),
        }
    }

    Ok(())
}

/// Write backend messages as JSON lines until the channel closes
pub async fn write_backend<W>(
    mut writer: W,
    outbound: AsyncReceiver<BackendEvent>,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Ok(event) = outbound.recv().await {
        let mut line = serde_json::to_string(&event)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
