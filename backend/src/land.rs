use crate::models::GeoPoint;

/// Axis-aligned box approximating a landmass.
///
/// A zone with `min_lon > max_lon` wraps across the ±180° meridian and covers
/// `[min_lon, 180]` plus `[-180, max_lon]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandZone {
    pub name: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl LandZone {
    const fn new(name: &'static str, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            name,
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    pub fn wraps_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        if point.lat < self.min_lat || point.lat > self.max_lat {
            return false;
        }
        if self.wraps_antimeridian() {
            point.lon >= self.min_lon || point.lon <= self.max_lon
        } else {
            point.lon >= self.min_lon && point.lon <= self.max_lon
        }
    }
}

/// Coarse Arctic land catalog: islands and mainland margins along the
/// Northern Sea Route and the North Atlantic approaches.
pub static LAND_ZONES: &[LandZone] = &[
    LandZone::new("Svalbard", 76.4, 80.9, 10.5, 33.5),
    LandZone::new("Franz Josef Land", 79.8, 81.9, 44.5, 65.5),
    LandZone::new("Novaya Zemlya (south island)", 70.5, 73.0, 51.5, 57.5),
    LandZone::new("Novaya Zemlya (north island)", 73.0, 76.0, 53.5, 62.0),
    LandZone::new("Novaya Zemlya (Cape Zhelaniya)", 76.0, 77.0, 60.0, 69.0),
    LandZone::new("Vaygach Island", 69.9, 70.5, 58.4, 60.5),
    LandZone::new("Kolguyev Island", 68.7, 69.5, 48.2, 49.9),
    LandZone::new("Kola Peninsula", 66.1, 68.8, 32.0, 41.3),
    LandZone::new("Kanin Peninsula", 66.3, 68.7, 43.3, 46.0),
    LandZone::new("Pechora Lowland", 67.0, 68.6, 46.0, 58.0),
    LandZone::new("Yugorsky Peninsula", 67.5, 69.6, 58.0, 66.0),
    LandZone::new("Yamal Peninsula", 66.5, 72.9, 66.5, 71.5),
    LandZone::new("Gydan Peninsula", 68.5, 72.5, 74.0, 80.0),
    LandZone::new("Taymyr Peninsula", 72.0, 77.7, 86.0, 114.0),
    LandZone::new("Severnaya Zemlya", 78.0, 81.3, 91.0, 107.0),
    LandZone::new("New Siberian Islands", 73.0, 76.2, 135.5, 158.0),
    LandZone::new("Wrangel Island", 70.8, 71.6, 178.5, -177.4),
    LandZone::new("Chukotka", 64.5, 69.8, 160.0, -169.5),
    LandZone::new("Alaska North Slope", 68.5, 71.4, -166.0, -141.0),
    LandZone::new("Canadian Arctic Archipelago", 69.0, 78.0, -125.0, -90.0),
    LandZone::new("Ellesmere Island", 76.2, 83.1, -90.0, -61.0),
    LandZone::new("Baffin Island", 62.0, 73.8, -90.0, -61.5),
    LandZone::new("Greenland", 59.8, 83.6, -73.0, -11.0),
    LandZone::new("Iceland", 63.3, 66.6, -24.6, -13.4),
    LandZone::new("Northern Scandinavia", 68.5, 71.2, 15.0, 31.0),
];

pub fn is_land(point: GeoPoint) -> bool {
    land_zone_at(point).is_some()
}

/// First catalog zone containing `point`.
pub fn land_zone_at(point: GeoPoint) -> Option<&'static LandZone> {
    LAND_ZONES.iter().find(|zone| zone.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_bounds_are_sane() {
        for zone in LAND_ZONES {
            assert!(zone.min_lat < zone.max_lat, "{} has inverted latitudes", zone.name);
            assert!((-90.0..=90.0).contains(&zone.min_lat), "{}", zone.name);
            assert!((-90.0..=90.0).contains(&zone.max_lat), "{}", zone.name);
            assert!((-180.0..=180.0).contains(&zone.min_lon), "{}", zone.name);
            assert!((-180.0..=180.0).contains(&zone.max_lon), "{}", zone.name);
        }
    }

    #[test]
    fn open_water_is_not_land() {
        // Barents Sea, central Kara Sea, Murmansk approaches.
        assert!(!is_land(GeoPoint::new(73.0, 30.0)));
        assert!(!is_land(GeoPoint::new(74.5, 68.0)));
        assert!(!is_land(GeoPoint::new(69.0, 33.08)));
        assert!(!is_land(GeoPoint::new(73.5, 70.0)));
    }

    #[test]
    fn islands_are_land() {
        assert_eq!(
            land_zone_at(GeoPoint::new(72.0, 54.0)).map(|z| z.name),
            Some("Novaya Zemlya (south island)")
        );
        assert!(is_land(GeoPoint::new(78.5, 16.0)));
    }

    #[test]
    fn wrapped_zone_covers_both_sides_of_the_antimeridian() {
        let wrangel = LAND_ZONES
            .iter()
            .find(|z| z.name == "Wrangel Island")
            .expect("catalog entry");
        assert!(wrangel.wraps_antimeridian());
        assert!(wrangel.contains(GeoPoint::new(71.2, 179.5)));
        assert!(wrangel.contains(GeoPoint::new(71.2, -179.5)));
        assert!(wrangel.contains(GeoPoint::new(71.2, 180.0)));
        assert!(!wrangel.contains(GeoPoint::new(71.2, 170.0)));
        assert!(!wrangel.contains(GeoPoint::new(71.2, -170.0)));
        assert!(!wrangel.contains(GeoPoint::new(72.0, 179.5)));
    }

    #[test]
    fn plain_zone_does_not_wrap() {
        let zone = LandZone::new("test", 10.0, 20.0, -10.0, 10.0);
        assert!(!zone.wraps_antimeridian());
        assert!(zone.contains(GeoPoint::new(15.0, 0.0)));
        assert!(zone.contains(GeoPoint::new(10.0, 10.0)));
        assert!(!zone.contains(GeoPoint::new(15.0, 170.0)));
    }

    #[test]
    fn chukotka_spans_the_antimeridian() {
        assert!(is_land(GeoPoint::new(66.0, 175.0)));
        assert!(is_land(GeoPoint::new(66.0, -175.0)));
        assert!(!is_land(GeoPoint::new(66.0, -165.0)));
    }
}
