use crate::models::{Coordinates, Place};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).max(0.0).sqrt())
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    pub id: i64,
    pub name: String,
    pub kind: PlaceKind,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceKind {
    Monastery,
    Archive,
    Service,
}

impl PlaceKind {
    pub fn label(&self) -> &'static str {
        match self {
            PlaceKind::Monastery => "Monastery",
            PlaceKind::Archive => "Archive",
            PlaceKind::Service => "Service",
        }
    }
}

/// Places within `radius_km` (inclusive) of `origin`, nearest first.
/// Equal distances keep input order; records with malformed coordinates
/// are skipped.
pub fn find_nearby<'a, I>(origin: &Coordinates, places: I, radius_km: f64) -> Vec<NearbyPlace>
where
    I: IntoIterator<Item = (PlaceKind, &'a dyn Place)>,
{
    let mut nearby: Vec<NearbyPlace> = places
        .into_iter()
        .filter_map(|(kind, place)| {
            let coords = place.coordinates()?;
            let distance_km = haversine_km(origin, &coords);
            (distance_km <= radius_km).then(|| NearbyPlace {
                id: place.id(),
                name: place.name().to_string(),
                kind,
                distance_km,
            })
        })
        .collect();

    // sort_by is stable
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}

/// "1.4 km" style label.
pub fn format_distance(distance_km: f64) -> String {
    format!("{:.1} km", distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PointOfInterest, SiteRecord};

    fn poi(id: i64, coords: &str) -> PointOfInterest {
        PointOfInterest {
            id,
            name: format!("Monastery {id}"),
            coordinates: coords.to_string(),
            map_url: String::new(),
            embed_html: String::new(),
            short_description: String::new(),
            long_description: String::new(),
            booking: None,
        }
    }

    fn site(id: i64, coords: &str) -> SiteRecord {
        SiteRecord {
            id,
            name: format!("Site {id}"),
            coordinates: coords.to_string(),
            long_description: String::new(),
            short_description: String::new(),
            description: String::new(),
            map_url: String::new(),
        }
    }

    #[test]
    fn distance_to_self_is_zero_and_symmetric() {
        let a = Coordinates::new(27.3389, 88.4167);
        let b = Coordinates::new(27.313, 88.605);
        assert_eq!(haversine_km(&a, &a), 0.0);
        assert!((haversine_km(&a, &b) - haversine_km(&b, &a)).abs() < 1e-9);
        // Gangtok area to Rumtek is roughly 19 km as the crow flies
        let d = haversine_km(&a, &b);
        assert!(d > 15.0 && d < 25.0, "got {d}");
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let origin = Coordinates::new(27.0, 88.0);
        let target = poi(1, "27.01,88.0");
        let exact = haversine_km(&origin, &target.coordinates().unwrap());
        let hits = find_nearby(&origin, [(PlaceKind::Monastery, &target as &dyn Place)], exact);
        assert_eq!(hits.len(), 1);
        let misses = find_nearby(
            &origin,
            [(PlaceKind::Monastery, &target as &dyn Place)],
            exact - 1e-9,
        );
        assert!(misses.is_empty());
    }

    #[test]
    fn sorted_by_distance_with_stable_ties() {
        let origin = Coordinates::new(27.3, 88.4);
        let far = poi(1, "27.31,88.4");
        let tie_poi = poi(2, "27.305,88.4");
        let bad = poi(3, "not,coords");
        let tie_archive = site(10, "27.305,88.4");
        let out_of_range = site(11, "27.9,88.4");

        let places: Vec<(PlaceKind, &dyn Place)> = vec![
            (PlaceKind::Monastery, &far),
            (PlaceKind::Monastery, &tie_poi),
            (PlaceKind::Monastery, &bad),
            (PlaceKind::Archive, &tie_archive),
            (PlaceKind::Service, &out_of_range),
        ];
        let hits = find_nearby(&origin, places, 2.0);
        let ids: Vec<i64> = hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2, 10, 1]);
        assert_eq!(hits[1].kind, PlaceKind::Archive);
    }

    #[test]
    fn formats_one_decimal() {
        assert_eq!(format_distance(1.26), "1.3 km");
        assert_eq!(format_distance(0.0), "0.0 km");
    }
}
