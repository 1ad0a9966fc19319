//! Value types shared by every RouteGuide operation.
//!
//! Coordinates are stored in the E7 representation: degrees multiplied by
//! 10^7 and kept as `i32`, so equality is exact integer equality and no
//! floating-point drift is introduced when points travel over the wire.

/// Scale factor between E7 fixed-point values and decimal degrees.
pub const COORD_FACTOR: f64 = 10_000_000.0;

/// A latitude/longitude pair in E7 fixed-point degrees.
///
/// `Point::default()` (both fields zero) is the sentinel "no location".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub latitude: i32,
    pub longitude: i32,
}

impl Point {
    pub const fn new(latitude: i32, longitude: i32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` for the `(0, 0)` sentinel.
    pub const fn is_unset(&self) -> bool {
        self.latitude == 0 && self.longitude == 0
    }

    /// Latitude in decimal degrees.
    pub fn latitude_degrees(&self) -> f64 {
        f64::from(self.latitude) / COORD_FACTOR
    }

    /// Longitude in decimal degrees.
    pub fn longitude_degrees(&self) -> f64 {
        f64::from(self.longitude) / COORD_FACTOR
    }
}

impl core::fmt::Display for Point {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "({:.7}, {:.7})",
            self.latitude_degrees(),
            self.longitude_degrees()
        )
    }
}

/// A named location. An empty name means the location is unnamed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub location: Point,
}

impl Feature {
    pub fn new(name: impl Into<String>, location: Point) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    /// A nameless feature at `location`, returned when nothing is stored
    /// there.
    pub fn unnamed(location: Point) -> Self {
        Self {
            name: String::new(),
            location,
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Two diagonally opposite corners of a latitude/longitude box.
///
/// The corners may arrive in any order; use [`Rectangle::bounds`] before
/// testing containment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub lo: Point,
    pub hi: Point,
}

impl Rectangle {
    pub const fn new(lo: Point, hi: Point) -> Self {
        Self { lo, hi }
    }

    /// Normalizes the corners into min/max bounds.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: self.lo.longitude.min(self.hi.longitude),
            right: self.lo.longitude.max(self.hi.longitude),
            top: self.lo.latitude.max(self.hi.latitude),
            bottom: self.lo.latitude.min(self.hi.latitude),
        }
    }
}

/// Normalized, inclusive bounds of a [`Rectangle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn contains(&self, point: &Point) -> bool {
        point.longitude >= self.left
            && point.longitude <= self.right
            && point.latitude >= self.bottom
            && point.latitude <= self.top
    }
}

/// A message sent from a location during a RouteChat call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteNote {
    pub location: Point,
    pub message: String,
}

impl RouteNote {
    pub fn new(location: Point, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }
}

/// Aggregate of a recorded route.
///
/// Fields are `i32` to line up with the wire schema. `distance` is in meters
/// and `elapsed_time` in seconds, both truncated toward zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteSummary {
    pub point_count: i32,
    pub feature_count: i32,
    pub distance: i32,
    pub elapsed_time: i32,
}
