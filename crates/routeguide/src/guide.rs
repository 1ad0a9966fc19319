//! Behavior behind the four RouteGuide RPCs, independent of any transport.
//!
//! [`RouteGuide`] is cheap to clone and shares a single read-only
//! [`FeatureStore`]. Everything that changes during a call (route counters,
//! chat history) lives in a value owned by that call: a [`RouteRecorder`] or
//! a [`ChatSession`].

use crate::{ChatSession, Feature, FeatureStore, Point, Rectangle, RouteSummary, distance_meters};
use futures::{Stream, TryStreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The RouteGuide service logic.
#[derive(Clone, Debug)]
pub struct RouteGuide {
    store: Arc<FeatureStore>,
}

impl RouteGuide {
    pub fn new(store: Arc<FeatureStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<FeatureStore> {
        &self.store
    }

    /// Returns the feature stored at `point`, or an unnamed feature at
    /// `point` when there is none.
    pub fn get_feature(&self, point: Point) -> Feature {
        self.store
            .lookup(point)
            .cloned()
            .unwrap_or_else(|| Feature::unnamed(point))
    }

    /// Lazily yields the features inside `rect` in store order.
    pub fn list_features<'a>(
        &'a self,
        rect: &Rectangle,
    ) -> impl Iterator<Item = &'a Feature> + use<'a> {
        self.store.within(rect)
    }

    /// Starts recording a route. The elapsed-time clock starts now.
    pub fn recorder(&self) -> RouteRecorder<'_> {
        RouteRecorder::new(&self.store)
    }

    /// Consumes a stream of points and summarizes the route they describe.
    ///
    /// The future suspends between points and completes once the stream
    /// ends. If the stream yields an error, recording stops and the error is
    /// returned without a summary.
    pub async fn record_route<S, E>(&self, points: S) -> Result<RouteSummary, E>
    where
        S: Stream<Item = Result<Point, E>>,
    {
        let mut points = core::pin::pin!(points);
        let mut recorder = self.recorder();

        while let Some(point) = points.try_next().await? {
            recorder.record(point);
        }

        Ok(recorder.finish())
    }

    /// Opens a new chat session with an empty history.
    pub fn chat(&self) -> ChatSession {
        ChatSession::new()
    }
}

/// Running counters for a single RecordRoute call.
#[derive(Debug)]
pub struct RouteRecorder<'a> {
    store: &'a FeatureStore,
    point_count: i32,
    feature_count: i32,
    distance: f64,
    prev_point: Option<Point>,
    started: Instant,
}

impl<'a> RouteRecorder<'a> {
    pub fn new(store: &'a FeatureStore) -> Self {
        Self {
            store,
            point_count: 0,
            feature_count: 0,
            distance: 0.0,
            prev_point: None,
            started: Instant::now(),
        }
    }

    /// Accounts for the next point on the route.
    pub fn record(&mut self, point: Point) {
        self.point_count = self.point_count.saturating_add(1);
        if self.store.lookup(point).is_some() {
            self.feature_count = self.feature_count.saturating_add(1);
        }
        if let Some(prev) = self.prev_point {
            self.distance += distance_meters(prev, point);
        }
        self.prev_point = Some(point);
    }

    pub fn point_count(&self) -> i32 {
        self.point_count
    }

    /// Total distance so far, in meters.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Produces the summary using the wall-clock time elapsed since
    /// construction.
    pub fn finish(self) -> RouteSummary {
        let elapsed = self.started.elapsed();
        self.finish_with_elapsed(elapsed)
    }

    /// Produces the summary with an explicit elapsed duration.
    pub fn finish_with_elapsed(self, elapsed: Duration) -> RouteSummary {
        RouteSummary {
            point_count: self.point_count,
            feature_count: self.feature_count,
            // `as` truncates toward zero and saturates at the i32 bounds.
            distance: self.distance as i32,
            elapsed_time: i32::try_from(elapsed.as_secs()).unwrap_or(i32::MAX),
        }
    }
}
