use std::f64::consts::FRAC_PI_2;

use crate::models::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance between two points, full precision.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Sum of per-segment haversine distances. Callers round the total, never the segments.
pub fn route_length_km(path: &[GeoPoint]) -> f64 {
    path.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

/// Even-odd ray casting over the ring taken as `(lon, lat)` pairs.
///
/// The ring does not need to be closed explicitly. Rings with fewer than three
/// vertices contain nothing. Points exactly on an edge may resolve either way.
pub fn point_in_polygon(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let (x, y) = (point.lon, point.lat);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (ring[i].lon, ring[i].lat);
        let (xj, yj) = (ring[j].lon, ring[j].lat);

        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Planar heading from `a` to `b` in radians, `atan2(Δlon, Δlat)`.
///
/// Only used as a deflection reference for the displacement search, not as a
/// geodesic bearing.
pub fn bearing(a: GeoPoint, b: GeoPoint) -> f64 {
    (b.lon - a.lon).atan2(b.lat - a.lat)
}

pub fn perpendicular(a: GeoPoint, b: GeoPoint) -> f64 {
    bearing(a, b) + FRAC_PI_2
}

/// Moves `point` by `distance_deg` plain degrees along `angle` (0 = north, π/2 = east).
pub fn offset_point(point: GeoPoint, angle: f64, distance_deg: f64) -> GeoPoint {
    GeoPoint {
        lat: point.lat + distance_deg * angle.cos(),
        lon: point.lon + distance_deg * angle.sin(),
    }
}

/// Wraps a longitude into `[-180, 180)`. Only for serialization targets that demand it.
pub fn normalize_lon(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to the modulus itself for tiny negative inputs.
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Pins a latitude to `[-90, 90]`. Probe offsets near the pole can overshoot.
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}
