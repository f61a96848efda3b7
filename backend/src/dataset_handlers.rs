// Read-only endpoints over the reference datasets in the data directory.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::AppState;
use crate::datasets::DatasetError;
use crate::models::ApiError;

type DatasetResult = Result<Json<Value>, (StatusCode, Json<ApiError>)>;

/// GET /api/ice - Ice conditions GeoJSON, as stored
pub async fn ice(State(state): State<AppState>) -> DatasetResult {
    state
        .datasets
        .ice_geojson()
        .map(Json)
        .map_err(dataset_error_to_api_error)
}

/// GET /api/ships - Fleet list
pub async fn ships(State(state): State<AppState>) -> DatasetResult {
    state
        .datasets
        .ships()
        .map(Json)
        .map_err(dataset_error_to_api_error)
}

/// GET /api/ships/:id - One ship by numeric id
pub async fn ship(State(state): State<AppState>, Path(id): Path<String>) -> DatasetResult {
    state
        .datasets
        .ship(&id)
        .map(Json)
        .map_err(dataset_error_to_api_error)
}

/// GET /api/routes - Recommended seasonal routes
pub async fn recommended_routes(State(state): State<AppState>) -> DatasetResult {
    state
        .datasets
        .recommended_routes()
        .map(Json)
        .map_err(dataset_error_to_api_error)
}

/// GET /api/status - Operational status document
pub async fn status(State(state): State<AppState>) -> DatasetResult {
    state
        .datasets
        .status()
        .map(Json)
        .map_err(dataset_error_to_api_error)
}

fn dataset_error_to_api_error(err: DatasetError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        DatasetError::ShipNotFound(_) => StatusCode::NOT_FOUND,
        DatasetError::Io { .. } | DatasetError::Parse { .. } => {
            tracing::error!("dataset unavailable: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (
        status,
        Json(ApiError {
            message: err.to_string(),
        }),
    )
}
