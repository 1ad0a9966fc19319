use super::{forward, surface};
use crate::server::telemetry::{increment_notes_echoed, increment_stream_errors};
use futures::{Stream, StreamExt};
use routeguide_tonic_core::{
    Error,
    Result,
    proto,
    routeguide::{ChatSession, RouteNote},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tonic::Status;

/// Drives one RouteChat call.
///
/// Each inbound note is answered with the earlier notes left at the same
/// location, and all of them are sent before the next inbound note is read.
/// The relay ends when the inbound stream ends, the caller stops reading or
/// `shutdown` fires. An inbound error is handed back to the caller as the
/// last item. Returns the number of notes echoed.
pub async fn relay_chat<S>(
    inbound: S,
    mut session: ChatSession,
    tx: mpsc::Sender<Result<proto::RouteNote, Status>>,
    shutdown: CancellationToken,
) -> Result<usize>
where
    S: Stream<Item = Result<proto::RouteNote, Status>>,
{
    let mut inbound = core::pin::pin!(inbound);
    let mut echoed = 0;

    loop {
        let next = tokio::select! {
            biased;
            () = shutdown.cancelled() => return Err(surface(&tx, Error::RequestCancelled)),
            () = tx.closed() => {
                return Err(Error::ChannelError {
                    context: "Chat receiver dropped".to_string(),
                });
            }
            next = inbound.next() => next,
        };

        let note = match next {
            Some(Ok(note)) => RouteNote::from(note),
            Some(Err(status)) => {
                increment_stream_errors();
                tracing::warn!("Inbound chat stream failed: {}", status);
                if let Err(e) = tx.send(Err(status)).await {
                    tracing::debug!("Failed to forward err: {}", e);
                }
                break;
            }
            None => break,
        };

        let echoes = session.receive(note);
        increment_notes_echoed(echoes.len() as u64);

        for echo in echoes {
            forward(&tx, echo.into(), &shutdown).await?;
            echoed += 1;
        }
    }

    tracing::debug!(
        "Chat closed after {} notes, {} echoed",
        session.history().len(),
        echoed
    );
    Ok(echoed)
}
