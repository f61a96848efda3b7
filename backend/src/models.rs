//! Wire types shared with API clients, re-exported for the engine modules.

pub use shared::{
    ApiError, DangerLevel, DirectLeg, Feature, FeatureCollection, GeoPoint, Geometry,
    HazardSource, IceProperties, IceZoneSummary, RoutePolicy, RouteRequest, RouteResponse,
    RouteSummary, ZoneId,
};
