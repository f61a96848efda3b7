use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid {field} coordinate: {reason}")]
    InvalidCoordinate { field: &'static str, reason: String },
    #[error("invalid hazard zone {zone}: {reason}")]
    InvalidHazardZone { zone: String, reason: String },
    #[error("failed to build GPX document: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

impl RouteError {
    /// True when the caller supplied bad input rather than the server failing.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            RouteError::InvalidCoordinate { .. } | RouteError::InvalidHazardZone { .. }
        )
    }
}
