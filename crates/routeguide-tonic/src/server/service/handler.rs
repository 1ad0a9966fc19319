//! gRPC service implementation for the RouteGuide API.
//!
//! [`RouteGuideService`] adapts the transport-independent
//! [`RouteGuide`] logic to the generated `RouteGuide` server trait.
//!
//! ## Responsibilities
//!
//! - Convert wire messages to domain types and back.
//! - Spawn one producer task per server-streaming or bidirectional call,
//!   connected to the response stream by a bounded channel.
//! - Register streaming calls with the [`StreamTracker`] so shutdown can
//!   drain them, and refuse new ones once shutdown has begun.

use crate::server::{
    config::ServerConfig,
    service::lifecycle::StreamTracker,
    streaming::{chat::relay_chat, features::feed_features},
    telemetry::{increment_requests, increment_stream_errors, record_route_points},
};
use core::pin::Pin;
use core::time::Duration;
use futures::TryStreamExt;
use routeguide_tonic_core::{
    Error,
    proto::{self, route_guide_server::RouteGuide as RouteGuideRpc},
    routeguide::{FeatureStore, Point, Rectangle, RouteGuide},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::{Stream, wrappers::ReceiverStream};
use tonic::{Request, Response, Status, Streaming};
use tracing::Instrument;

/// The `routeguide.RouteGuide` gRPC service.
///
/// Cloning is cheap: clones share the feature store and the stream tracker.
#[derive(Clone, Debug)]
pub struct RouteGuideService {
    guide: RouteGuide,
    config: ServerConfig,
    tracker: Arc<StreamTracker>,
}

impl RouteGuideService {
    pub fn new(store: Arc<FeatureStore>, config: ServerConfig) -> Self {
        let tracker = StreamTracker::new(Duration::from_secs(config.shutdown_timeout));
        Self {
            guide: RouteGuide::new(store),
            config,
            tracker: Arc::new(tracker),
        }
    }

    /// Refuses new streams, drains in-flight ones for up to
    /// `shutdown_timeout` seconds, then cancels whatever is still running.
    pub async fn shutdown(&self) -> Result<(), Error> {
        self.tracker.shutdown().await
    }
}

#[tonic::async_trait]
impl RouteGuideRpc for RouteGuideService {
    type ListFeaturesStream = Pin<Box<dyn Stream<Item = Result<proto::Feature, Status>> + Send>>;
    type RouteChatStream = Pin<Box<dyn Stream<Item = Result<proto::RouteNote, Status>> + Send>>;

    #[tracing::instrument(skip_all, fields(lat = req.get_ref().latitude, lon = req.get_ref().longitude))]
    async fn get_feature(
        &self,
        req: Request<proto::Point>,
    ) -> Result<Response<proto::Feature>, Status> {
        increment_requests("GetFeature");

        let point = Point::from(req.into_inner());
        let feature = self.guide.get_feature(point);
        tracing::debug!("Found {:?} at {}", feature.name, point);

        Ok(Response::new(feature.into()))
    }

    #[tracing::instrument(skip_all)]
    async fn list_features(
        &self,
        req: Request<proto::Rectangle>,
    ) -> Result<Response<Self::ListFeaturesStream>, Status> {
        increment_requests("ListFeatures");
        let guard = self.tracker.begin().inspect_err(|_| increment_stream_errors())?;

        let rect = Rectangle::from(req.into_inner());
        let (tx, rx) = mpsc::channel(self.config.stream_buffer_size);
        let guide = self.guide.clone();
        let shutdown = self.tracker.token().clone();

        let fut = async move {
            let _guard = guard;
            if let Err(e) = feed_features(guide, rect, tx, shutdown).await {
                increment_stream_errors();
                tracing::warn!("Error: {}", e);
            }
        };
        tokio::spawn(fut.instrument(tracing::info_span!("streaming")));

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }

    #[tracing::instrument(skip_all)]
    async fn record_route(
        &self,
        req: Request<Streaming<proto::Point>>,
    ) -> Result<Response<proto::RouteSummary>, Status> {
        increment_requests("RecordRoute");
        let _guard = self.tracker.begin().inspect_err(|_| increment_stream_errors())?;

        let points = req.into_inner().map_ok(Point::from);
        let summary = tokio::select! {
            biased;
            () = self.tracker.token().cancelled() => {
                increment_stream_errors();
                return Err(Error::RequestCancelled.into());
            }
            summary = self.guide.record_route(points) => {
                summary.inspect_err(|_| increment_stream_errors())?
            }
        };

        record_route_points(u64::try_from(summary.point_count).unwrap_or_default());
        tracing::debug!(
            points = summary.point_count,
            features = summary.feature_count,
            distance = summary.distance,
            "Route recorded"
        );

        Ok(Response::new(summary.into()))
    }

    #[tracing::instrument(skip_all)]
    async fn route_chat(
        &self,
        req: Request<Streaming<proto::RouteNote>>,
    ) -> Result<Response<Self::RouteChatStream>, Status> {
        increment_requests("RouteChat");
        let guard = self.tracker.begin().inspect_err(|_| increment_stream_errors())?;

        let inbound = req.into_inner();
        let (tx, rx) = mpsc::channel(self.config.chat_buffer_size);
        let session = self.guide.chat();
        let shutdown = self.tracker.token().clone();

        let fut = async move {
            let _guard = guard;
            if let Err(e) = relay_chat(inbound, session, tx, shutdown).await {
                increment_stream_errors();
                tracing::warn!("Error: {}", e);
            }
        };
        tokio::spawn(fut.instrument(tracing::info_span!("chat")));

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}
