//! `notebox bridge`: line-delimited JSON requests on stdin, responses on stdout.
//!
//! Each input line is `{"operation": "...", "payload": ...}`. Each response is
//! written as one line, in request order. A line that is not a request, even
//! one that is not UTF-8, gets an `invalid_request` response and the session
//! carries on.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use notebox_core::bridge::{RequestEnvelope, Response};
use notebox_core::NoteboxError;

use crate::app::AppContext;

pub async fn handle_bridge(ctx: &AppContext<'_>) -> anyhow::Result<()> {
    let bridge = ctx.bridge()?;
    info!(store = %ctx.store_path()?.display(), "bridge listening on stdin");

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let response = match serde_json::from_slice::<RequestEnvelope>(&line) {
            Ok(envelope) => bridge.dispatch(&envelope.operation, envelope.payload).await,
            Err(err) => {
                debug!(error = %err, "unparseable bridge line");
                Response::rejected(
                    "",
                    serde_json::Value::Null,
                    &NoteboxError::InvalidInput(format!("malformed request: {}", err)),
                )
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await?;
        stdout.flush().await?;
    }

    info!("stdin closed, bridge stopping");
    Ok(())
}
