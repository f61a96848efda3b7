pub mod analytics;
pub mod config;
pub mod dataset_handlers;
pub mod datasets;
pub mod error;
pub mod geometry;
pub mod gpx_export;
pub mod hazard;
pub mod land;
pub mod models;
pub mod routing;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::analytics::{analyze_route, direct_leg};
use crate::config::GeneratorConfig;
use crate::datasets::DatasetStore;
use crate::error::RouteError;
use crate::geometry::clamp_lat;
use crate::gpx_export::encode_route_as_gpx;
use crate::hazard::HazardField;
use crate::models::{ApiError, GeoPoint, HazardSource, RouteRequest, RouteResponse, RouteSummary};
use crate::routing::{GeneratedRoute, plan_routes};

#[derive(Clone)]
pub struct AppState {
    pub datasets: Arc<DatasetStore>,
    pub generator: GeneratorConfig,
}

impl AppState {
    pub fn new(datasets: DatasetStore, generator: GeneratorConfig) -> Self {
        Self {
            datasets: Arc::new(datasets),
            generator,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/route/calculate", post(route_handler))
        .route("/api/ice", get(dataset_handlers::ice))
        .route("/api/ships", get(dataset_handlers::ships))
        .route("/api/ships/:id", get(dataset_handlers::ship))
        .route("/api/routes", get(dataset_handlers::recommended_routes))
        .route("/api/status", get(dataset_handlers::status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_handler(
    State(state): State<AppState>,
    Json(req): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<ApiError>)> {
    validate_coordinate("start", req.start).map_err(route_error)?;
    validate_coordinate("end", req.end).map_err(route_error)?;

    let (hazards, hazard_source) = resolve_hazards(&state, &req).map_err(route_error)?;
    tracing::info!(
        start = ?req.start,
        end = ?req.end,
        zones = hazards.len(),
        ?hazard_source,
        "calculating routes"
    );

    let response = calculate_routes(
        req.start,
        req.end,
        &hazards,
        hazard_source,
        &state.generator,
    )
    .map_err(route_error)?;

    Ok(Json(response))
}

/// Rejects non-finite coordinates and latitudes outside `[-90, 90]`.
///
/// Longitude is only required to be finite: routes that cross the
/// antimeridian are expressed with longitudes past ±180.
pub fn validate_coordinate(field: &'static str, point: GeoPoint) -> Result<(), RouteError> {
    if !point.lat.is_finite() || !point.lon.is_finite() {
        return Err(RouteError::InvalidCoordinate {
            field,
            reason: format!("lat {} / lon {} must be finite", point.lat, point.lon),
        });
    }
    if point.lat.abs() > 90.0 {
        return Err(RouteError::InvalidCoordinate {
            field,
            reason: format!("latitude {} is outside [-90, 90]", point.lat),
        });
    }
    Ok(())
}

/// Picks the hazard field for a request. Inline ice data wins over the
/// server dataset; a broken server dataset degrades to an empty field.
fn resolve_hazards(
    state: &AppState,
    req: &RouteRequest,
) -> Result<(HazardField, HazardSource), RouteError> {
    if let Some(ice) = &req.ice_data {
        let hazards = HazardField::from_feature_collection(ice)?;
        return Ok((hazards, HazardSource::Request));
    }

    if !req.use_server_ice {
        return Ok((HazardField::empty(), HazardSource::None));
    }

    let loaded = state
        .datasets
        .ice_features()
        .map_err(|err| err.to_string())
        .and_then(|ice| HazardField::from_feature_collection(&ice).map_err(|err| err.to_string()));

    match loaded {
        Ok(hazards) => Ok((hazards, HazardSource::Server)),
        Err(reason) => {
            tracing::warn!("server ice data unavailable, planning without hazards: {reason}");
            Ok((HazardField::empty(), HazardSource::Unavailable))
        }
    }
}

/// Generates both policies for one leg and attaches analytics and GPX.
pub fn calculate_routes(
    start: GeoPoint,
    end: GeoPoint,
    hazards: &HazardField,
    hazard_source: HazardSource,
    generator: &GeneratorConfig,
) -> Result<RouteResponse, RouteError> {
    let plan = plan_routes(start, end, hazards, generator);

    Ok(RouteResponse {
        safe: summarize_route(plan.safe, hazards)?,
        optimal: summarize_route(plan.optimal, hazards)?,
        direct: direct_leg(start, end),
        hazard_source,
    })
}

fn summarize_route(route: GeneratedRoute, hazards: &HazardField) -> Result<RouteSummary, RouteError> {
    let metrics = analyze_route(&route.waypoints, hazards);
    let gpx_base64 = encode_route_as_gpx(route.policy, &route.waypoints)?;

    Ok(RouteSummary {
        policy: route.policy,
        waypoints: wire_waypoints(&route.waypoints),
        distance_km: metrics.distance_km,
        estimated_time_hours: metrics.estimated_time_hours,
        max_danger: metrics.max_danger,
        icebreaker_required: metrics.icebreaker_required,
        ice_zones: metrics.ice_zones,
        avg_concentration: metrics.avg_concentration,
        dropped_waypoints: route.dropped_waypoints,
        gpx_base64,
    })
}

/// `[lon, lat]` pairs for the response. Longitudes stay raw across the
/// antimeridian; latitudes are pinned to the valid range.
fn wire_waypoints(waypoints: &[GeoPoint]) -> Vec<[f64; 2]> {
    waypoints
        .iter()
        .map(|p| GeoPoint::new(clamp_lat(p.lat), p.lon).to_lon_lat())
        .collect()
}

fn route_error(err: RouteError) -> (StatusCode, Json<ApiError>) {
    let status = if err.is_invalid_input() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!("route calculation failed: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
