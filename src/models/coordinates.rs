use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Parse a `"lat,lng"` string as found in the static collections.
    /// Returns `None` for anything that is not two finite, in-range numbers.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(',');
        let lat = parts.next()?.trim().parse::<f64>().ok()?;
        let lng = parts.next()?.trim().parse::<f64>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        let coords = Self::new(lat, lng);
        coords.is_valid().then_some(coords)
    }

    /// Finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `[lat, lng]` pair as expected by the map library.
    pub fn as_pair(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// District name derived from coordinates.
pub fn region_for(raw: &str) -> &'static str {
    let Some(coords) = Coordinates::parse(raw) else {
        return "Location Unknown";
    };
    let (lat, lng) = (coords.latitude, coords.longitude);
    if lat >= 27.5 {
        "North Sikkim"
    } else if lat >= 27.2 {
        if lng >= 88.5 {
            "East Sikkim"
        } else {
            "South Sikkim"
        }
    } else {
        "West Sikkim"
    }
}

/// Rectangular bounds, south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl GeoBounds {
    pub fn new(south_west: Coordinates, north_east: Coordinates) -> Self {
        Self { south_west, north_east }
    }

    /// `[[s, w], [n, e]]` as expected by the map library.
    pub fn as_pairs(&self) -> [[f64; 2]; 2] {
        [self.south_west.as_pair(), self.north_east.as_pair()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_whitespace() {
        let c = Coordinates::parse(" 27.35, 88.45 ").unwrap();
        assert_eq!(c, Coordinates::new(27.35, 88.45));
        assert!(c.latitude.is_finite() && c.longitude.is_finite());
    }

    #[test]
    fn rejects_malformed() {
        for raw in [
            "",
            "27.3",
            "27.3,",
            "abc,88.4",
            "27.3,88.4,1",
            "NaN,88.4",
            "inf,1",
            "91,10",
            "10,181",
            ",",
            "27.3;88.4",
        ] {
            assert!(Coordinates::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn region_naming_follows_latitude_bands() {
        assert_eq!(region_for("27.6,88.5"), "North Sikkim");
        assert_eq!(region_for("27.5,88.1"), "North Sikkim");
        assert_eq!(region_for("27.33,88.61"), "East Sikkim");
        assert_eq!(region_for("27.30,88.40"), "South Sikkim");
        assert_eq!(region_for("27.10,88.20"), "West Sikkim");
        assert_eq!(region_for("  "), "Location Unknown");
    }

    #[test]
    fn validity_matches_parse() {
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(f64::INFINITY, 88.0).is_valid());
        assert!(!Coordinates::new(27.0, -180.5).is_valid());
    }
}
