//! Conversions between generated wire messages and `routeguide` domain
//! types.
//!
//! Message-typed fields are optional on the wire. An absent `Point` decodes
//! to the `(0, 0)` sentinel, the same value proto3 readers observe for an
//! unset field. Outbound conversions always populate every field.

use crate::proto;
use routeguide::{Feature, Point, Rectangle, RouteNote, RouteSummary};

fn point_or_sentinel(point: Option<proto::Point>) -> Point {
    point.map(Point::from).unwrap_or_default()
}

impl From<proto::Point> for Point {
    fn from(p: proto::Point) -> Self {
        Point::new(p.latitude, p.longitude)
    }
}

impl From<Point> for proto::Point {
    fn from(p: Point) -> Self {
        proto::Point {
            latitude: p.latitude,
            longitude: p.longitude,
        }
    }
}

impl From<proto::Rectangle> for Rectangle {
    fn from(r: proto::Rectangle) -> Self {
        Rectangle::new(point_or_sentinel(r.lo), point_or_sentinel(r.hi))
    }
}

impl From<Rectangle> for proto::Rectangle {
    fn from(r: Rectangle) -> Self {
        proto::Rectangle {
            lo: Some(r.lo.into()),
            hi: Some(r.hi.into()),
        }
    }
}

impl From<proto::Feature> for Feature {
    fn from(f: proto::Feature) -> Self {
        Feature::new(f.name, point_or_sentinel(f.location))
    }
}

impl From<Feature> for proto::Feature {
    fn from(f: Feature) -> Self {
        proto::Feature {
            name: f.name,
            location: Some(f.location.into()),
        }
    }
}

impl From<&Feature> for proto::Feature {
    fn from(f: &Feature) -> Self {
        proto::Feature {
            name: f.name.clone(),
            location: Some(f.location.into()),
        }
    }
}

impl From<proto::RouteNote> for RouteNote {
    fn from(n: proto::RouteNote) -> Self {
        RouteNote::new(point_or_sentinel(n.location), n.message)
    }
}

impl From<RouteNote> for proto::RouteNote {
    fn from(n: RouteNote) -> Self {
        proto::RouteNote {
            location: Some(n.location.into()),
            message: n.message,
        }
    }
}

impl From<proto::RouteSummary> for RouteSummary {
    fn from(s: proto::RouteSummary) -> Self {
        RouteSummary {
            point_count: s.point_count,
            feature_count: s.feature_count,
            distance: s.distance,
            elapsed_time: s.elapsed_time,
        }
    }
}

impl From<RouteSummary> for proto::RouteSummary {
    fn from(s: RouteSummary) -> Self {
        proto::RouteSummary {
            point_count: s.point_count,
            feature_count: s.feature_count,
            distance: s.distance,
            elapsed_time: s.elapsed_time,
        }
    }
}
