//! File-backed reference datasets served next to the route calculator.
//!
//! Files are read on every call so an operator can replace them without a
//! restart.

use std::{fs, io, path::PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::FeatureCollection;

pub const ICE_FILE: &str = "ice.geojson";
pub const SHIPS_FILE: &str = "ships.json";
pub const ROUTES_FILE: &str = "routes.json";
pub const STATUS_FILE: &str = "status.json";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {file}: {source}")]
    Io {
        file: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("ship {0} not found")]
    ShipNotFound(String),
}

#[derive(Debug, Clone)]
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Raw ice GeoJSON, passed through untouched.
    pub fn ice_geojson(&self) -> Result<Value, DatasetError> {
        self.read_json(ICE_FILE)
    }

    /// Ice GeoJSON parsed into hazard features.
    pub fn ice_features(&self) -> Result<FeatureCollection, DatasetError> {
        self.read_json(ICE_FILE)
    }

    pub fn ships(&self) -> Result<Value, DatasetError> {
        self.read_json(SHIPS_FILE)
    }

    /// Looks a ship up by numeric id in the `ships` array of `ships.json`.
    pub fn ship(&self, id: &str) -> Result<Value, DatasetError> {
        let not_found = || DatasetError::ShipNotFound(id.to_string());
        let wanted: i64 = id.trim().parse().map_err(|_| not_found())?;

        let ships = self.ships()?;
        ships
            .get("ships")
            .and_then(Value::as_array)
            .and_then(|list| {
                list.iter()
                    .find(|ship| ship.get("id").and_then(Value::as_i64) == Some(wanted))
            })
            .cloned()
            .ok_or_else(not_found)
    }

    pub fn recommended_routes(&self) -> Result<Value, DatasetError> {
        self.read_json(ROUTES_FILE)
    }

    pub fn status(&self) -> Result<Value, DatasetError> {
        self.read_json(STATUS_FILE)
    }

    fn read_json<T: DeserializeOwned>(&self, file: &'static str) -> Result<T, DatasetError> {
        let path = self.dir.join(file);
        let content = fs::read_to_string(&path).map_err(|source| DatasetError::Io { file, source })?;
        serde_json::from_str(&content).map_err(|source| DatasetError::Parse { file, source })
    }
}
