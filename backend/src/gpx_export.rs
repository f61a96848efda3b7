use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::RouteError;
use crate::geometry::{clamp_lat, normalize_lon};
use crate::models::{GeoPoint, RoutePolicy};

const CREATOR: &str = "arctic-navigator";

/// Encodes a route as a base64 GPX 1.1 track.
pub fn encode_route_as_gpx(policy: RoutePolicy, path: &[GeoPoint]) -> Result<String, RouteError> {
    let buffer = write_route_gpx(policy, path)?;
    Ok(BASE64.encode(buffer))
}

/// Raw GPX 1.1 document for a route. Longitudes are wrapped into
/// `[-180, 180)` and latitudes pinned to `[-90, 90]`, the ranges GPX allows.
pub fn write_route_gpx(policy: RoutePolicy, path: &[GeoPoint]) -> Result<Vec<u8>, RouteError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };
    let mut track = Track {
        name: Some(format!("{CREATOR} {policy} route")),
        ..Default::default()
    };

    let mut segment = TrackSegment::new();
    for waypoint in path.iter().map(to_waypoint) {
        segment.points.push(waypoint);
    }
    track.segments.push(segment);
    gpx.tracks.push(track);

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(buffer)
}

fn to_waypoint(point: &GeoPoint) -> Waypoint {
    Waypoint::new(Point::new(normalize_lon(point.lon), clamp_lat(point.lat)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_named_track_with_every_point() {
        let path = [
            GeoPoint::new(69.0, 33.08),
            GeoPoint::new(71.0, 50.0),
            GeoPoint::new(73.5, 70.0),
        ];
        let document = write_route_gpx(RoutePolicy::Safe, &path).expect("gpx");
        let text = String::from_utf8(document).expect("utf-8");

        assert!(text.contains("arctic-navigator safe route"));
        assert_eq!(text.matches("<trkpt").count(), 3);
    }

    #[test]
    fn wraps_longitudes_past_the_antimeridian() {
        let path = [GeoPoint::new(71.0, 170.0), GeoPoint::new(72.0, 190.0)];
        let document = write_route_gpx(RoutePolicy::Optimal, &path).expect("gpx");
        let parsed = gpx::read(document.as_slice()).expect("round trip");
        let points = &parsed.tracks[0].segments[0].points;
        let lon = points[1].point().x();
        assert!((lon + 170.0).abs() < 1e-9, "got {lon}");
    }

    #[test]
    fn pins_latitudes_that_overshoot_the_pole() {
        let path = [
            GeoPoint::new(89.5, 0.0),
            GeoPoint::new(90.207, 5.0),
            GeoPoint::new(89.5, 10.0),
        ];
        let document = write_route_gpx(RoutePolicy::Safe, &path).expect("gpx");
        let parsed = gpx::read(document.as_slice()).expect("round trip");
        let lats: Vec<f64> = parsed.tracks[0].segments[0]
            .points
            .iter()
            .map(|p| p.point().y())
            .collect();
        assert_eq!(lats, vec![89.5, 90.0, 89.5]);
    }

    #[test]
    fn base64_payload_is_not_empty() {
        let encoded =
            encode_route_as_gpx(RoutePolicy::Safe, &[GeoPoint::new(72.5, 20.0)]).expect("gpx");
        assert!(!encoded.is_empty());
        let decoded = BASE64.decode(encoded).expect("valid base64");
        assert!(String::from_utf8(decoded).unwrap().contains("<gpx"));
    }
}
