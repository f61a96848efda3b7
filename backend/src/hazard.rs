use crate::{
    error::RouteError,
    geometry::point_in_polygon,
    models::{DangerLevel, Feature, FeatureCollection, GeoPoint, Geometry, ZoneId},
};

const BASE_WEIGHT: f64 = 1.0;
const SEVERE_CONCENTRATION: f64 = 80.0;
const CONCENTRATION_WEIGHT_DIVISOR: f64 = 20.0;

/// One ice hazard polygon with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardZone {
    pub id: ZoneId,
    pub ice_type: Option<String>,
    /// Percent, 0 to 100.
    pub concentration: f64,
    pub thickness_cm: Option<f64>,
    pub danger_level: DangerLevel,
    pub drift_speed: Option<f64>,
    pub drift_direction: Option<f64>,
    /// Outer ring; need not repeat the first vertex.
    pub boundary: Vec<GeoPoint>,
}

impl HazardZone {
    pub fn contains(&self, point: GeoPoint) -> bool {
        point_in_polygon(point, &self.boundary)
    }

    /// High danger, or concentration above 80%.
    pub fn is_severe(&self) -> bool {
        self.danger_level == DangerLevel::High || self.concentration > SEVERE_CONCENTRATION
    }

    /// Amount this zone adds to the route weight of any point it contains.
    pub fn weight(&self) -> f64 {
        let tier = match self.danger_level {
            DangerLevel::High => 5.0,
            DangerLevel::Medium => 2.0,
            DangerLevel::Low => 0.5,
        };
        tier + self.concentration / CONCENTRATION_WEIGHT_DIVISOR
    }

    fn from_feature(index: usize, feature: &Feature) -> Result<Option<Self>, RouteError> {
        let props = &feature.properties;
        let id = props
            .id
            .clone()
            .or_else(|| feature.id.clone())
            .unwrap_or_else(|| ZoneId::Text(format!("zone-{index}")));

        let rings = match &feature.geometry {
            Some(Geometry::Polygon { coordinates }) => coordinates,
            Some(Geometry::Unsupported) | None => {
                tracing::debug!("skipping hazard feature {id}: not a polygon");
                return Ok(None);
            }
        };

        let invalid = |reason: String| RouteError::InvalidHazardZone {
            zone: id.to_string(),
            reason,
        };

        let outer = rings
            .first()
            .ok_or_else(|| invalid("polygon has no rings".into()))?;
        let boundary = outer
            .iter()
            .map(|position| match position.as_slice() {
                [lon, lat, ..] if lon.is_finite() && lat.is_finite() => {
                    Ok(GeoPoint { lat: *lat, lon: *lon })
                }
                _ => Err(invalid(format!("malformed position {position:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if boundary.len() < 3 {
            return Err(invalid(format!(
                "outer ring has {} positions, at least 3 required",
                boundary.len()
            )));
        }

        let concentration = props.concentration.unwrap_or(0.0);
        if !(0.0..=100.0).contains(&concentration) {
            return Err(invalid(format!(
                "concentration {concentration} outside 0..=100"
            )));
        }

        Ok(Some(Self {
            id,
            ice_type: props.ice_type.clone(),
            concentration,
            thickness_cm: props.thickness_cm,
            danger_level: props.danger_level.unwrap_or_default(),
            drift_speed: props.drift_speed,
            drift_direction: props.drift_direction,
            boundary,
        }))
    }
}

/// Hazard zones for a single route calculation. Never mutated once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardField {
    zones: Vec<HazardZone>,
}

impl HazardField {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(zones: Vec<HazardZone>) -> Self {
        Self { zones }
    }

    /// Builds the field from GeoJSON. Non-polygon features are skipped; polygon
    /// holes are ignored.
    pub fn from_feature_collection(collection: &FeatureCollection) -> Result<Self, RouteError> {
        let mut zones = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.iter().enumerate() {
            if let Some(zone) = HazardZone::from_feature(index, feature)? {
                zones.push(zone);
            }
        }
        tracing::debug!(
            "hazard field built: {} zones from {} features",
            zones.len(),
            collection.features.len()
        );
        Ok(Self { zones })
    }

    pub fn zones(&self) -> &[HazardZone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zones_containing(&self, point: GeoPoint) -> impl Iterator<Item = &HazardZone> + '_ {
        self.zones.iter().filter(move |zone| zone.contains(point))
    }

    pub fn is_severe(&self, point: GeoPoint) -> bool {
        self.zones_containing(point).any(HazardZone::is_severe)
    }

    /// Additive hazard weight at `point`: 1.0 plus every containing zone's
    /// contribution, uncapped.
    pub fn weight_at(&self, point: GeoPoint) -> f64 {
        self.zones_containing(point)
            .fold(BASE_WEIGHT, |acc, zone| acc + zone.weight())
    }
}
