use std::{net::SocketAddr, path::PathBuf};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_DIR: &str = "backend/data";
pub const MAX_INTERIOR_STEPS: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    BindAddr { var: &'static str, value: String },
    #[error("{var} must be an integer in 1..={max}, got {value}")]
    InteriorSteps {
        var: &'static str,
        value: String,
        max: usize,
    },
}

/// Deterministic search constants for the waypoint displacement procedure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Number of interpolation steps between start and end.
    pub interior_steps: usize,
    /// Directions probed around a blocked point, evenly spaced.
    pub probe_directions: usize,
    /// Radial probe distance (plain degrees) when a point is on land.
    pub land_probe_offset_deg: f64,
    /// Radial probe distance (plain degrees) when a point is in severe ice.
    pub hazard_probe_offset_deg: f64,
    /// Grid spacing (plain degrees) of the optimal policy's local search.
    pub grid_step_deg: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            interior_steps: 20,
            probe_directions: 8,
            land_probe_offset_deg: 0.5,
            hazard_probe_offset_deg: 1.0,
            grid_step_deg: 0.3,
        }
    }
}

impl GeneratorConfig {
    pub fn with_interior_steps(self, interior_steps: usize) -> Self {
        Self {
            interior_steps: interior_steps.clamp(1, MAX_INTERIOR_STEPS),
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory with `ice.geojson`, `ships.json`, `routes.json`, `status.json`.
    pub data_dir: PathBuf,
    pub generator: GeneratorConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value.parse::<SocketAddr>().map_err(|_| ConfigError::BindAddr {
            var: "BIND_ADDR",
            value: bind_value.clone(),
        })?;

        let data_dir = lookup("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let mut generator = GeneratorConfig::default();
        if let Some(value) = lookup("ROUTE_INTERIOR_STEPS") {
            generator.interior_steps = parse_interior_steps(&value)?;
        }

        Ok(Self {
            bind_addr,
            data_dir,
            generator,
        })
    }
}

/// Parses an interior step count, rejecting anything outside `1..=500`.
pub fn parse_interior_steps(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(steps) if (1..=MAX_INTERIOR_STEPS).contains(&steps) => Ok(steps),
        _ => Err(ConfigError::InteriorSteps {
            var: "ROUTE_INTERIOR_STEPS",
            value: value.to_string(),
            max: MAX_INTERIOR_STEPS,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).expect("defaults");
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_dir, PathBuf::from("backend/data"));
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(config.generator.interior_steps, 20);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATA_DIR", "/srv/arctic"),
            ("ROUTE_INTERIOR_STEPS", "40"),
        ]))
        .expect("valid overrides");
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.data_dir, PathBuf::from("/srv/arctic"));
        assert_eq!(config.generator.interior_steps, 40);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ServerConfig::from_lookup(lookup_from(&[("BIND_ADDR", "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::BindAddr { .. }));

        for bad in ["0", "-3", "abc", "501"] {
            let err = ServerConfig::from_lookup(lookup_from(&[("ROUTE_INTERIOR_STEPS", bad)]))
                .unwrap_err();
            assert!(matches!(err, ConfigError::InteriorSteps { .. }), "{bad}");
        }
    }

    #[test]
    fn parses_interior_steps_in_range() {
        assert_eq!(parse_interior_steps(" 42 ").unwrap(), 42);
        assert_eq!(parse_interior_steps("500").unwrap(), MAX_INTERIOR_STEPS);
        assert!(parse_interior_steps("10000").is_err());
    }

    #[test]
    fn interior_steps_are_clamped() {
        let config = GeneratorConfig::default();
        assert_eq!(config.with_interior_steps(0).interior_steps, 1);
        assert_eq!(config.with_interior_steps(10_000).interior_steps, MAX_INTERIOR_STEPS);
        assert_eq!(config.with_interior_steps(12).interior_steps, 12);
    }
}
