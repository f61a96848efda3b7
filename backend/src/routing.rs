use std::f64::consts::TAU;

use crate::{
    config::GeneratorConfig,
    geometry::{offset_point, perpendicular},
    hazard::HazardField,
    land::is_land,
    models::{GeoPoint, RoutePolicy},
};

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRoute {
    pub policy: RoutePolicy,
    /// First element is always the start, last is always the end.
    pub waypoints: Vec<GeoPoint>,
    /// Interior samples removed because no water position was found for them.
    pub dropped_waypoints: usize,
}

/// Both policy routes for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub safe: GeneratedRoute,
    pub optimal: GeneratedRoute,
}

/// Generate a waypoint sequence from `start` to `end` under `policy`.
///
/// # Algorithm: Bounded Displacement over a Straight Interpolation
///
/// 1. Emit `start`.
/// 2. Interpolate linearly in plain lat/lon space at ratios `i / (N + 1)` for
///    the `N` interior steps `i = 1..=N`, so the start and end are never
///    sampled twice.
/// 3. Displace each interpolated point:
///    - **Land avoidance** (both policies): probe `probe_directions` directions
///      starting at the route's perpendicular heading, `land_probe_offset_deg`
///      away, and keep the first water candidate.
///    - **Safe**: if the point sits in severe ice, probe again at
///      `hazard_probe_offset_deg` and keep the first candidate that is neither
///      land nor severe.
///    - **Optimal**: scan a 3×3 grid of `±grid_step_deg` offsets (lon outer, lat
///      inner, ascending, centre skipped) and move to the water candidate with
///      the lowest hazard weight, if strictly lower than the current one.
/// 4. Drop the point if it is still on land.
/// 5. Emit `end`.
///
/// The procedure is deterministic and its cost is bounded by
/// `steps × candidates × zones`. It never fails; when no candidate helps, the
/// straight interpolation is kept.
pub fn generate_route(
    start: GeoPoint,
    end: GeoPoint,
    policy: RoutePolicy,
    hazards: &HazardField,
    config: &GeneratorConfig,
) -> GeneratedRoute {
    let steps = config.interior_steps.max(1);
    let heading = perpendicular(start, end);
    let mut waypoints = Vec::with_capacity(steps + 2);
    let mut dropped_waypoints = 0;

    waypoints.push(start);

    for i in 1..=steps {
        let t = i as f64 / (steps + 1) as f64;
        let naive = start.interpolate(end, t);
        let base = avoid_land(naive, heading, config);

        let point = match policy {
            RoutePolicy::Safe => avoid_severe_ice(base, heading, hazards, config),
            RoutePolicy::Optimal => descend_weight(base, hazards, config),
        };

        if is_land(point) {
            tracing::debug!("{policy}: dropping step {i} at {point:?}, no water position found");
            dropped_waypoints += 1;
            continue;
        }
        waypoints.push(point);
    }

    waypoints.push(end);

    if dropped_waypoints > 0 {
        tracing::warn!(
            "{policy} route dropped {dropped_waypoints} of {steps} interior waypoints"
        );
    }

    GeneratedRoute {
        policy,
        waypoints,
        dropped_waypoints,
    }
}

/// Compute the safe and optimal routes concurrently. The two share no state.
pub fn plan_routes(
    start: GeoPoint,
    end: GeoPoint,
    hazards: &HazardField,
    config: &GeneratorConfig,
) -> RoutePlan {
    let (safe, optimal) = rayon::join(
        || generate_route(start, end, RoutePolicy::Safe, hazards, config),
        || generate_route(start, end, RoutePolicy::Optimal, hazards, config),
    );
    RoutePlan { safe, optimal }
}

fn avoid_land(point: GeoPoint, heading: f64, config: &GeneratorConfig) -> GeoPoint {
    if !is_land(point) {
        return point;
    }
    probe_ring(
        point,
        heading,
        config.land_probe_offset_deg,
        config.probe_directions,
        |candidate| !is_land(candidate),
    )
    .unwrap_or(point)
}

fn avoid_severe_ice(
    point: GeoPoint,
    heading: f64,
    hazards: &HazardField,
    config: &GeneratorConfig,
) -> GeoPoint {
    if !hazards.is_severe(point) {
        return point;
    }
    probe_ring(
        point,
        heading,
        config.hazard_probe_offset_deg,
        config.probe_directions,
        |candidate| !is_land(candidate) && !hazards.is_severe(candidate),
    )
    .unwrap_or(point)
}

fn descend_weight(point: GeoPoint, hazards: &HazardField, config: &GeneratorConfig) -> GeoPoint {
    let offsets = [-config.grid_step_deg, 0.0, config.grid_step_deg];
    let mut best = point;
    let mut best_weight = hazards.weight_at(point);

    for dlon in offsets {
        for dlat in offsets {
            if dlat == 0.0 && dlon == 0.0 {
                continue;
            }
            let candidate = GeoPoint {
                lat: point.lat + dlat,
                lon: point.lon + dlon,
            };
            if is_land(candidate) {
                continue;
            }
            let weight = hazards.weight_at(candidate);
            if weight < best_weight {
                best = candidate;
                best_weight = weight;
            }
        }
    }

    best
}

/// First candidate on a ring of `radius_deg` around `point` accepted by `accept`,
/// walking `directions` evenly spaced headings from `heading`.
fn probe_ring(
    point: GeoPoint,
    heading: f64,
    radius_deg: f64,
    directions: usize,
    accept: impl Fn(GeoPoint) -> bool,
) -> Option<GeoPoint> {
    let increment = TAU / directions.max(1) as f64;
    (0..directions)
        .map(|k| offset_point(point, heading + k as f64 * increment, radius_deg))
        .find(|&candidate| accept(candidate))
}
