use crate::Point;

/// Mean Earth radius used by [`distance_meters`].
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two points, in meters.
///
/// Uses the haversine formula over a sphere of radius
/// [`EARTH_RADIUS_METERS`]. Coordinates outside the valid latitude/longitude
/// ranges are computed as-is.
pub fn distance_meters(start: Point, end: Point) -> f64 {
    let lat_1 = start.latitude_degrees();
    let lat_2 = end.latitude_degrees();
    let lon_1 = start.longitude_degrees();
    let lon_2 = end.longitude_degrees();

    let lat_rad_1 = lat_1.to_radians();
    let lat_rad_2 = lat_2.to_radians();
    let delta_lat_rad = (lat_2 - lat_1).to_radians();
    let delta_lon_rad = (lon_2 - lon_1).to_radians();

    let a = (delta_lat_rad / 2.0).sin().powi(2)
        + lat_rad_1.cos() * lat_rad_2.cos() * (delta_lon_rad / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
