use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    /// GeoJSON position order: `[lon, lat]`.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Ice danger tier. Declaration order is the escalation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePolicy {
    /// Hard-avoids land and severe ice.
    Safe,
    /// Locally minimizes the additive ice weight.
    Optimal,
}

impl RoutePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutePolicy::Safe => "safe",
            RoutePolicy::Optimal => "optimal",
        }
    }
}

impl fmt::Display for RoutePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hazard zone identifier as found in the source data (numbers or strings).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::Number(n) => write!(f, "{n}"),
            ZoneId::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// GeoJSON hazard input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ZoneId>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: IceProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Rings of `[lon, lat, ...]` positions; the first ring is the outer boundary.
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IceProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ZoneId>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ice_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub danger_level: Option<DangerLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_direction: Option<f64>,
}

// ---------------------------------------------------------------------------
// Route calculation contract
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    #[serde(rename = "iceData", default, skip_serializing_if = "Option::is_none")]
    pub ice_data: Option<FeatureCollection>,
    #[serde(rename = "useServerIce", default)]
    pub use_server_ice: bool,
}

impl RouteRequest {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            start,
            end,
            ice_data: None,
            use_server_ice: false,
        }
    }
}

/// Where the hazard zones used for a calculation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardSource {
    Request,
    Server,
    None,
    /// The server dataset was requested but could not be loaded.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceZoneSummary {
    pub id: ZoneId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ice_type: Option<String>,
    pub concentration: f64,
    pub danger_level: DangerLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness_cm: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub policy: RoutePolicy,
    /// `[lon, lat]` pairs.
    pub waypoints: Vec<[f64; 2]>,
    pub distance_km: u64,
    pub estimated_time_hours: u64,
    pub max_danger: DangerLevel,
    pub icebreaker_required: bool,
    pub ice_zones: Vec<IceZoneSummary>,
    pub avg_concentration: u32,
    #[serde(default)]
    pub dropped_waypoints: usize,
    #[serde(default)]
    pub gpx_base64: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectLeg {
    pub distance_km: u64,
    pub estimated_time_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub safe: RouteSummary,
    pub optimal: RouteSummary,
    pub direct: DirectLeg,
    pub hazard_source: HazardSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
