use super::forward;
use crate::server::telemetry::increment_features_streamed;
use routeguide_tonic_core::{
    Result,
    proto,
    routeguide::{Rectangle, RouteGuide},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tonic::Status;

/// Streams every feature inside `rect` to `tx` in store order.
///
/// The producer suspends whenever the channel is full, so at most
/// `capacity` features are buffered ahead of the caller. Returns the number
/// of features sent.
///
/// # Errors
///
/// Stops early with the error from [`forward`] if the caller disconnects or
/// the service shuts down.
pub async fn feed_features(
    guide: RouteGuide,
    rect: Rectangle,
    tx: mpsc::Sender<Result<proto::Feature, Status>>,
    shutdown: CancellationToken,
) -> Result<usize> {
    let mut sent = 0;

    for feature in guide.list_features(&rect) {
        forward(&tx, proto::Feature::from(feature), &shutdown).await?;
        increment_features_streamed(1);
        sent += 1;
    }

    tracing::debug!("Streamed {} features", sent);
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeguide_tonic_core::{
        Error,
        routeguide::{Feature, FeatureStore, Point},
    };
    use std::sync::Arc;

    fn grid_guide() -> RouteGuide {
        let features = (0..5)
            .flat_map(|lat| (0..5).map(move |lon| Feature::new(format!("{lat}/{lon}"), Point::new(lat, lon))))
            .collect::<FeatureStore>();
        RouteGuide::new(Arc::new(features))
    }

    #[tokio::test]
    async fn streams_matches_in_store_order() {
        let (tx, mut rx) = mpsc::channel(2);
        let rect = Rectangle::new(Point::new(3, 1), Point::new(1, 2));
        let producer = tokio::spawn(feed_features(grid_guide(), rect, tx, CancellationToken::new()));

        let mut names = Vec::new();
        while let Some(item) = rx.recv().await {
            names.push(item.unwrap().name);
        }

        assert_eq!(names, ["1/1", "1/2", "2/1", "2/2", "3/1", "3/2"]);
        assert_eq!(producer.await.unwrap().unwrap(), 6);
    }

    #[tokio::test]
    async fn empty_rectangle_ends_without_items() {
        let (tx, mut rx) = mpsc::channel(1);
        let rect = Rectangle::new(Point::new(100, 100), Point::new(200, 200));
        let sent = feed_features(grid_guide(), rect, tx, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(sent, 0);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn producer_stops_when_the_receiver_is_dropped() {
        let (tx, mut rx) = mpsc::channel(1);
        let rect = Rectangle::new(Point::new(0, 0), Point::new(4, 4));
        let producer = tokio::spawn(feed_features(grid_guide(), rect, tx, CancellationToken::new()));

        assert!(rx.recv().await.is_some());
        drop(rx);

        let err = producer.await.unwrap().unwrap_err();
        assert!(matches!(err, Error::ChannelError { .. }));
    }

    #[tokio::test]
    async fn producer_stops_on_shutdown() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        let rect = Rectangle::new(Point::new(0, 0), Point::new(4, 4));
        let producer = tokio::spawn(feed_features(grid_guide(), rect, tx, token.clone()));

        assert!(rx.recv().await.unwrap().is_ok());
        token.cancel();

        assert_eq!(producer.await.unwrap().unwrap_err(), Error::RequestCancelled);
        let mut remaining = 0;
        while rx.recv().await.is_some() {
            remaining += 1;
        }
        assert!(remaining < 25);
    }
}
