//! Immutable, in-memory feature database.
//!
//! The store is loaded once at startup from a JSON array of
//! `{ "location": { "latitude", "longitude" }, "name" }` records and is never
//! mutated afterwards. Share it across tasks with `Arc<FeatureStore>`; no
//! locking is involved because there is no write path.

use crate::{Error, Feature, Point, Rectangle, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FeatureRecord {
    #[serde(default)]
    location: Option<LocationRecord>,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    latitude: i32,
    longitude: i32,
}

impl FeatureRecord {
    /// Converts a record into a [`Feature`], dropping placeholder entries.
    ///
    /// A placeholder has no location at all, or has neither a name nor a
    /// real location. Unnamed features at a real location are kept.
    fn into_feature(self) -> Option<Feature> {
        let location = self.location?;
        let point = Point::new(location.latitude, location.longitude);
        if self.name.is_empty() && point.is_unset() {
            return None;
        }
        Some(Feature::new(self.name, point))
    }
}

/// Ordered, read-only collection of [`Feature`]s.
#[derive(Clone, Debug, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
}

impl FeatureStore {
    /// Builds a store from features already in memory, preserving order.
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Loads the JSON feature database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read and
    /// [`Error::Malformed`] if it is not a valid feature list.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(BufReader::new(file))?;
        tracing::info!("Loaded {} features", store.len());
        Ok(store)
    }

    /// Parses a JSON feature list from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let records: Vec<FeatureRecord> = serde_json::from_reader(reader)?;
        let total = records.len();
        let features: Vec<Feature> = records
            .into_iter()
            .filter_map(FeatureRecord::into_feature)
            .collect();

        let skipped = total - features.len();
        if skipped > 0 {
            tracing::debug!("Skipped {skipped} placeholder entries");
        }

        Ok(Self { features })
    }

    /// Returns the first feature, in load order, located exactly at `point`.
    pub fn lookup(&self, point: Point) -> Option<&Feature> {
        self.features.iter().find(|f| f.location == point)
    }

    /// Lazily yields every feature inside `rect`, in load order.
    ///
    /// The rectangle is normalized first, so the corners may be given in any
    /// order. Bounds are inclusive.
    pub fn within<'a>(&'a self, rect: &Rectangle) -> impl Iterator<Item = &'a Feature> + use<'a> {
        let bounds = rect.bounds();
        self.features
            .iter()
            .filter(move |f| bounds.contains(&f.location))
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<Feature> for FeatureStore {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureStore {
    type Item = &'a Feature;
    type IntoIter = core::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB: &str = r#"[
        { "location": { "latitude": 407838351, "longitude": -746143763 }, "name": "Patriots Path, Mendham, NJ 07945, USA" },
        { "location": { "latitude": 408122808, "longitude": -743999179 }, "name": "101 New Jersey 10, Whippany, NJ 07981, USA" },
        { "location": { "latitude": 407113723, "longitude": -749746483 }, "name": "" },
        { "location": { "latitude": 0, "longitude": 0 }, "name": "" },
        { "name": "Nowhere in particular" },
        { "location": { "latitude": 413628156, "longitude": -749015468 }, "name": "U.S. 6, Shohola, PA 18458, USA" },
        { "location": { "latitude": 407838351, "longitude": -746143763 }, "name": "Duplicate of Patriots Path" }
    ]"#;

    fn store() -> FeatureStore {
        FeatureStore::from_reader(DB.as_bytes()).unwrap()
    }

    #[test]
    fn skips_only_placeholder_entries() {
        let store = store();
        assert_eq!(store.len(), 5);
        assert!(store.iter().all(|f| !f.location.is_unset()));
        assert!(store.iter().any(|f| f.name.is_empty()));
    }

    #[test]
    fn named_feature_at_sentinel_location_is_kept() {
        let json = r#"[{ "location": { "latitude": 0, "longitude": 0 }, "name": "Null Island" }]"#;
        let store = FeatureStore::from_reader(json.as_bytes()).unwrap();
        assert_eq!(store.lookup(Point::default()).unwrap().name, "Null Island");
    }

    #[test]
    fn lookup_returns_first_match_in_load_order() {
        let store = store();
        let found = store.lookup(Point::new(407838351, -746143763)).unwrap();
        assert_eq!(found.name, "Patriots Path, Mendham, NJ 07945, USA");
    }

    #[test]
    fn lookup_finds_unnamed_features() {
        let store = store();
        let found = store.lookup(Point::new(407113723, -749746483)).unwrap();
        assert!(!found.is_named());
    }

    #[test]
    fn lookup_misses_return_none() {
        let store = store();
        assert!(store.lookup(Point::new(407838351, -746143764)).is_none());
        assert!(store.lookup(Point::default()).is_none());
    }

    #[test]
    fn within_preserves_load_order_and_ignores_corner_order() {
        let store = store();
        let lo = Point::new(400000000, -750000000);
        let hi = Point::new(420000000, -730000000);

        let forward: Vec<_> = store.within(&Rectangle::new(lo, hi)).cloned().collect();
        let backward: Vec<_> = store.within(&Rectangle::new(hi, lo)).cloned().collect();

        assert_eq!(forward, backward);
        let expected: Vec<_> = store.iter().cloned().collect();
        assert_eq!(forward, expected);
    }

    #[test]
    fn within_matches_brute_force_membership() {
        let store = store();
        let rect = Rectangle::new(
            Point::new(408122808, -743999179),
            Point::new(407000000, -749800000),
        );
        let bounds = rect.bounds();
        let listed: Vec<_> = store.within(&rect).collect();
        for feature in &store {
            let inside = feature.location.latitude >= bounds.bottom
                && feature.location.latitude <= bounds.top
                && feature.location.longitude >= bounds.left
                && feature.location.longitude <= bounds.right;
            assert_eq!(listed.contains(&feature), inside, "{feature:?}");
        }
        // Corner point sits exactly on the boundary.
        assert!(listed.iter().any(|f| f.location == Point::new(408122808, -743999179)));
    }

    #[test]
    fn within_empty_region_yields_nothing() {
        let store = store();
        let rect = Rectangle::new(Point::new(1, 1), Point::new(2, 2));
        assert_eq!(store.within(&rect).count(), 0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = FeatureStore::from_reader(&b"{ not json"[..]).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));

        let err = FeatureStore::from_reader(&br#"[{ "location": { "latitude": "north" } }]"#[..])
            .unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FeatureStore::load("/definitely/not/here/route_guide_db.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("route_guide_db.json"));
    }

    #[test]
    fn shipped_database_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/route_guide_db.json");
        let store = FeatureStore::load(path).unwrap();
        assert!(!store.is_empty());
        let found = store.lookup(Point::new(409146138, -746188906)).unwrap();
        assert_eq!(
            found.name,
            "Berkshire Valley Management Area Trail, Jefferson, NJ, USA"
        );
    }
}
