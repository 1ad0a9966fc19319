//! Demo driver that exercises every RouteGuide RPC once.
//!
//! Used by the `routeguide-client` binary. Each step prints what the server
//! returned and [`run`] collects the results into a [`DriverReport`].

use anyhow::{Context, bail};
use rand::Rng;
use routeguide_tonic_core::{
    proto::{self, route_guide_client::RouteGuideClient},
    routeguide::{Feature, FeatureStore, Point, Rectangle, RouteNote, RouteSummary},
};
use tonic::transport::Channel;

/// A point with a known feature in the shipped database.
///
/// Longitudes here are west of Greenwich (negative), matching the database;
/// positive-longitude variants of these coordinates match nothing.
pub const KNOWN_POINT: Point = Point::new(409_146_138, -746_188_906);

/// The rectangle queried by [`list_features`].
pub const SEARCH_AREA: Rectangle = Rectangle {
    lo: Point::new(400_000_000, -750_000_000),
    hi: Point::new(420_000_000, -730_000_000),
};

/// What the driver saw across all four calls.
#[derive(Debug, Clone, Default)]
pub struct DriverReport {
    /// Names of the named features returned by the lookups.
    pub found: Vec<String>,
    pub listed: usize,
    pub route: RouteSummary,
    pub echoes: Vec<RouteNote>,
}

/// Runs GetFeature, ListFeatures, RecordRoute and RouteChat in order.
///
/// `store` is the local copy of the database the random route is drawn from.
pub async fn run(
    mut client: RouteGuideClient<Channel>,
    store: &FeatureStore,
    route_points: usize,
) -> anyhow::Result<DriverReport> {
    let mut report = DriverReport::default();

    for point in [KNOWN_POINT, Point::default()] {
        if let Some(feature) = get_feature(&mut client, point).await? {
            if feature.is_named() {
                report.found.push(feature.name);
            }
        }
    }

    report.listed = list_features(&mut client, SEARCH_AREA).await?.len();
    report.route = record_route(&mut client, random_route(store, route_points)?).await?;
    report.echoes = route_chat(&mut client, chat_notes()).await?;

    Ok(report)
}

/// Looks up `point`. Returns `None` when the server answers with a feature
/// that has no location.
pub async fn get_feature(
    client: &mut RouteGuideClient<Channel>,
    point: Point,
) -> anyhow::Result<Option<Feature>> {
    let response = client
        .get_feature(proto::Point::from(point))
        .await
        .context("GetFeature failed")?
        .into_inner();

    if response.location.is_none() {
        println!("Server returned incomplete feature");
        return Ok(None);
    }

    let feature = Feature::from(response);
    if feature.is_named() {
        println!("Found feature called {:?} at {}", feature.name, feature.location);
    } else {
        println!("Found no feature at {}", feature.location);
    }
    Ok(Some(feature))
}

pub async fn list_features(
    client: &mut RouteGuideClient<Channel>,
    rect: Rectangle,
) -> anyhow::Result<Vec<Feature>> {
    println!("Looking for features within {} .. {}", rect.lo, rect.hi);

    let mut stream = client
        .list_features(proto::Rectangle::from(rect))
        .await
        .context("ListFeatures failed")?
        .into_inner();

    let mut features = Vec::new();
    while let Some(feature) = stream.message().await? {
        let feature = Feature::from(feature);
        println!("Feature: name = {:?}, point = {}", feature.name, feature.location);
        features.push(feature);
    }
    Ok(features)
}

pub async fn record_route(
    client: &mut RouteGuideClient<Channel>,
    points: Vec<Point>,
) -> anyhow::Result<RouteSummary> {
    println!("Traversing {} points", points.len());

    let outbound = tokio_stream::iter(points.into_iter().map(proto::Point::from));
    let summary = RouteSummary::from(
        client
            .record_route(outbound)
            .await
            .context("RecordRoute failed")?
            .into_inner(),
    );

    println!(
        "Route summary: {} points, {} features, {} meters, {} seconds",
        summary.point_count, summary.feature_count, summary.distance, summary.elapsed_time
    );
    Ok(summary)
}

/// Sends `notes` and collects every note echoed back.
pub async fn route_chat(
    client: &mut RouteGuideClient<Channel>,
    notes: Vec<RouteNote>,
) -> anyhow::Result<Vec<RouteNote>> {
    let outbound = tokio_stream::iter(notes.into_iter().map(proto::RouteNote::from));
    let mut inbound = client
        .route_chat(outbound)
        .await
        .context("RouteChat failed")?
        .into_inner();

    let mut echoes = Vec::new();
    while let Some(note) = inbound.message().await? {
        let note = RouteNote::from(note);
        println!("Got message {:?} at {}", note.message, note.location);
        echoes.push(note);
    }
    Ok(echoes)
}

/// Picks `count` feature locations from `store` at random, repeats allowed.
pub fn random_route(store: &FeatureStore, count: usize) -> anyhow::Result<Vec<Point>> {
    if store.is_empty() {
        bail!("cannot build a route from an empty feature database");
    }

    let features: Vec<&Feature> = store.iter().collect();
    let mut rng = rand::rng();
    Ok((0..count)
        .map(|_| features[rng.random_range(0..features.len())].location)
        .collect())
}

/// The fixed note sequence sent by [`route_chat`] in the demo run.
pub fn chat_notes() -> Vec<RouteNote> {
    vec![
        RouteNote::new(Point::new(0, 0), "First message"),
        RouteNote::new(Point::new(0, 1), "Second message"),
        RouteNote::new(Point::new(1, 0), "Third message"),
        RouteNote::new(Point::new(0, 0), "Fourth message"),
        RouteNote::new(Point::new(1, 0), "Fifth message"),
    ]
}
