//! Stream accounting and coordinated shutdown.
//!
//! Every streaming call holds a [`StreamGuard`] for as long as its producer
//! runs. [`StreamTracker::shutdown`] uses the live count to drain in-flight
//! streams before cancelling whatever is left through the shared
//! [`CancellationToken`].

use crate::server::telemetry::{
    decrement_streams_inflight, increment_streams_inflight, record_stream_duration,
};
use core::time::Duration;
use routeguide_tonic_core::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct StreamTracker {
    inflight: AtomicUsize,
    closing: AtomicBool,
    shutdown_token: CancellationToken,
    shutdown_timeout: Duration,
}

impl StreamTracker {
    pub fn new(shutdown_timeout: Duration) -> Self {
        Self {
            inflight: AtomicUsize::new(0),
            closing: AtomicBool::new(false),
            shutdown_token: CancellationToken::new(),
            shutdown_timeout,
        }
    }

    /// Registers a new stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceShutdown`] once [`shutdown`](Self::shutdown)
    /// has started.
    pub fn begin(self: &Arc<Self>) -> Result<StreamGuard, Error> {
        if self.is_closing() {
            return Err(Error::ServiceShutdown);
        }

        self.inflight.fetch_add(1, Ordering::AcqRel);
        increment_streams_inflight();

        Ok(StreamGuard {
            tracker: Arc::clone(self),
            started: Instant::now(),
        })
    }

    pub fn is_closing(&self) -> bool {
        self.closing.load(Ordering::Acquire)
    }

    pub fn inflight(&self) -> usize {
        self.inflight.load(Ordering::Acquire)
    }

    /// Token cancelled once the drain phase of shutdown is over.
    pub fn token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Stops accepting new streams, waits up to the configured timeout for
    /// in-flight streams to finish, then cancels the rest.
    pub async fn shutdown(&self) -> Result<(), Error> {
        tracing::info!("Refusing new streams");
        self.closing.store(true, Ordering::Release);

        tracing::info!("Draining in-flight streams ({} active)", self.inflight());
        let drained = timeout(self.shutdown_timeout, async {
            while self.inflight() > 0 {
                sleep(Duration::from_millis(100)).await;
            }
        })
        .await;

        match drained {
            Ok(()) => tracing::debug!("All in-flight streams drained successfully"),
            Err(_) => tracing::warn!(
                "Graceful drain timed out ({} streams still active)",
                self.inflight()
            ),
        }

        tracing::debug!("Cancelling remaining streams via shutdown token");
        self.shutdown_token.cancel();

        tracing::info!("Stream shutdown complete");
        Ok(())
    }
}

/// Held by a streaming producer for its whole lifetime.
#[derive(Debug)]
pub struct StreamGuard {
    tracker: Arc<StreamTracker>,
    started: Instant,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.tracker.inflight.fetch_sub(1, Ordering::AcqRel);
        decrement_streams_inflight();
        record_stream_duration(self.started.elapsed().as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_track_inflight_streams() {
        let tracker = Arc::new(StreamTracker::new(Duration::from_secs(1)));
        let a = tracker.begin().unwrap();
        let b = tracker.begin().unwrap();
        assert_eq!(tracker.inflight(), 2);
        drop(a);
        assert_eq!(tracker.inflight(), 1);
        drop(b);
        assert_eq!(tracker.inflight(), 0);
    }

    #[tokio::test]
    async fn shutdown_refuses_new_streams_and_cancels() {
        let tracker = Arc::new(StreamTracker::new(Duration::from_millis(10)));
        tracker.shutdown().await.unwrap();

        assert!(tracker.token().is_cancelled());
        assert_eq!(tracker.begin().unwrap_err(), Error::ServiceShutdown);
    }

    #[tokio::test]
    async fn shutdown_waits_for_streams_to_drain() {
        let tracker = Arc::new(StreamTracker::new(Duration::from_secs(5)));
        let guard = tracker.begin().unwrap();

        let release = tokio::spawn(async move {
            sleep(Duration::from_millis(150)).await;
            drop(guard);
        });

        let started = Instant::now();
        tracker.shutdown().await.unwrap();
        release.await.unwrap();

        assert_eq!(tracker.inflight(), 0);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(tracker.token().is_cancelled());
    }

    #[tokio::test]
    async fn stuck_streams_are_cancelled_after_the_timeout() {
        let tracker = Arc::new(StreamTracker::new(Duration::from_millis(50)));
        let _guard = tracker.begin().unwrap();
        let token = tracker.token().clone();

        tracker.shutdown().await.unwrap();
        assert_eq!(tracker.inflight(), 1);
        assert!(token.is_cancelled());
    }
}
