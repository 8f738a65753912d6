use serde_json::Value;

use crate::models::{Coordinates, GeoBounds};

/// Bounding box of every position in a GeoJSON document (FeatureCollection,
/// Feature or bare geometry). `None` when no valid position is found.
pub fn geojson_bounds(doc: &Value) -> Option<GeoBounds> {
    let mut acc: Option<GeoBounds> = None;
    visit(doc, &mut acc);
    acc
}

fn visit(value: &Value, acc: &mut Option<GeoBounds>) {
    let Some(obj) = value.as_object() else {
        return;
    };
    if let Some(coords) = obj.get("coordinates") {
        collect_positions(coords, acc);
    }
    if let Some(geometry) = obj.get("geometry") {
        visit(geometry, acc);
    }
    for key in ["features", "geometries"] {
        if let Some(items) = obj.get(key).and_then(Value::as_array) {
            items.iter().for_each(|item| visit(item, acc));
        }
    }
}

fn collect_positions(value: &Value, acc: &mut Option<GeoBounds>) {
    let Some(items) = value.as_array() else {
        return;
    };
    // GeoJSON positions are [lng, lat, ...]
    if items.len() >= 2 && items[0].is_number() && items[1].is_number() {
        let (Some(lng), Some(lat)) = (items[0].as_f64(), items[1].as_f64()) else {
            return;
        };
        extend(acc, Coordinates::new(lat, lng));
        return;
    }
    items.iter().for_each(|item| collect_positions(item, acc));
}

fn extend(acc: &mut Option<GeoBounds>, point: Coordinates) {
    match acc {
        None => *acc = Some(GeoBounds::new(point, point)),
        Some(b) => {
            b.south_west.latitude = b.south_west.latitude.min(point.latitude);
            b.south_west.longitude = b.south_west.longitude.min(point.longitude);
            b.north_east.latitude = b.north_east.latitude.max(point.latitude);
            b.north_east.longitude = b.north_east.longitude.max(point.longitude);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bounds_of_feature_collection() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[88.0, 27.1], [88.9, 27.1], [88.9, 28.1], [88.0, 27.1]]]
                }
            }]
        });
        let b = geojson_bounds(&doc).unwrap();
        assert_eq!(b.as_pairs(), [[27.1, 88.0], [28.1, 88.9]]);
    }

    #[test]
    fn empty_or_foreign_documents_have_no_bounds() {
        assert!(geojson_bounds(&json!({"type": "FeatureCollection", "features": []})).is_none());
        assert!(geojson_bounds(&json!("not geojson")).is_none());
    }
}
