use std::collections::HashSet;

use crate::{
    geometry::{haversine_km, route_length_km},
    hazard::{HazardField, HazardZone},
    models::{DangerLevel, DirectLeg, GeoPoint, IceZoneSummary},
};

/// Nominal transit speed, regardless of vessel or ice.
pub const CRUISE_SPEED_KNOTS: f64 = 10.0;
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;
/// Medium-danger zones above this concentration call for an icebreaker.
const ICEBREAKER_MEDIUM_CONCENTRATION: f64 = 70.0;

/// Hazard exposure and transit figures for one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMetrics {
    pub distance_km: u64,
    pub estimated_time_hours: u64,
    pub max_danger: DangerLevel,
    pub icebreaker_required: bool,
    /// Zones touched by at least one waypoint, in first-hit order, each once.
    pub ice_zones: Vec<IceZoneSummary>,
    pub avg_concentration: u32,
}

pub fn estimated_time_hours(distance_km: u64) -> u64 {
    (distance_km as f64 / (CRUISE_SPEED_KNOTS * KM_PER_NAUTICAL_MILE)).round() as u64
}

/// Straight great-circle reference leg between the request endpoints.
pub fn direct_leg(start: GeoPoint, end: GeoPoint) -> DirectLeg {
    let distance_km = haversine_km(start, end).round() as u64;
    DirectLeg {
        distance_km,
        estimated_time_hours: estimated_time_hours(distance_km),
    }
}

/// Summarize a route against the same hazard field it was generated with.
///
/// Every waypoint is tested against every zone. A zone enters `ice_zones` on
/// its first hit only, and only those first hits feed the concentration
/// average. Danger escalates over every hit and never drops back.
pub fn analyze_route(waypoints: &[GeoPoint], hazards: &HazardField) -> RouteMetrics {
    let distance_km = route_length_km(waypoints).round() as u64;

    let mut max_danger = DangerLevel::Low;
    let mut icebreaker_required = false;
    let mut seen = HashSet::new();
    let mut ice_zones = Vec::new();
    let mut total_concentration = 0.0;

    for &point in waypoints {
        for zone in hazards.zones_containing(point) {
            max_danger = max_danger.max(zone.danger_level);
            icebreaker_required |= requires_icebreaker(zone);

            if seen.insert(&zone.id) {
                total_concentration += zone.concentration;
                ice_zones.push(summarize(zone));
            }
        }
    }

    let avg_concentration = if ice_zones.is_empty() {
        0
    } else {
        (total_concentration / ice_zones.len() as f64).round() as u32
    };

    RouteMetrics {
        distance_km,
        estimated_time_hours: estimated_time_hours(distance_km),
        max_danger,
        icebreaker_required,
        ice_zones,
        avg_concentration,
    }
}

fn requires_icebreaker(zone: &HazardZone) -> bool {
    match zone.danger_level {
        DangerLevel::High => true,
        DangerLevel::Medium => zone.concentration > ICEBREAKER_MEDIUM_CONCENTRATION,
        DangerLevel::Low => false,
    }
}

fn summarize(zone: &HazardZone) -> IceZoneSummary {
    IceZoneSummary {
        id: zone.id.clone(),
        ice_type: zone.ice_type.clone(),
        concentration: zone.concentration,
        danger_level: zone.danger_level,
        thickness_cm: zone.thickness_cm,
    }
}
