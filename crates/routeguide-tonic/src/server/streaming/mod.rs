//! Producer tasks behind the server-streaming and bidirectional RPCs.
//!
//! Each producer owns its per-call state, writes into a bounded
//! [`mpsc`] channel drained by the transport, and stops at its next
//! suspension point when the receiver goes away or the shutdown token is
//! cancelled.

pub mod chat;
pub mod features;

use routeguide_tonic_core::{Error, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tonic::Status;

/// Sends one item downstream, suspending while the channel is full.
///
/// # Errors
///
/// - [`Error::RequestCancelled`] if `shutdown` fires first. The caller is
///   told with a best-effort `CANCELLED` status.
/// - [`Error::ChannelError`] if the receiver is gone.
pub(crate) async fn forward<T>(
    tx: &mpsc::Sender<Result<T, Status>>,
    item: T,
    shutdown: &CancellationToken,
) -> Result<()> {
    tokio::select! {
        biased;
        () = shutdown.cancelled() => Err(surface(tx, Error::RequestCancelled)),
        sent = tx.send(Ok(item)) => sent.map_err(|e| Error::ChannelError {
            context: format!("Failed to forward response: {e}"),
        }),
    }
}

/// Makes a best effort to hand `err` to the caller as the final stream item,
/// then returns it.
pub(crate) fn surface<T>(tx: &mpsc::Sender<Result<T, Status>>, err: Error) -> Error {
    if let Err(e) = tx.try_send(Err(err.clone().into())) {
        tracing::debug!("Failed to forward err: {}", e);
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forward_reports_a_closed_receiver() {
        let (tx, rx) = mpsc::channel::<Result<u8, Status>>(1);
        drop(rx);
        let err = forward(&tx, 1, &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, Error::ChannelError { .. }));
    }

    #[tokio::test]
    async fn forward_stops_on_shutdown_even_when_full() {
        let (tx, mut rx) = mpsc::channel::<Result<u8, Status>>(1);
        let token = CancellationToken::new();
        forward(&tx, 1, &token).await.unwrap();

        token.cancel();
        assert_eq!(forward(&tx, 2, &token).await.unwrap_err(), Error::RequestCancelled);

        // The buffered item is still delivered; the channel had no room for
        // the cancellation status.
        assert_eq!(rx.recv().await.unwrap().unwrap(), 1);
        drop(tx);
        assert!(rx.recv().await.is_none());
    }
}
