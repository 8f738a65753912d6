use serde::{Deserialize, Serialize};

use super::coordinates::Coordinates;

/// Anything that can be listed, searched and put on the map.
pub trait Place {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn raw_coords(&self) -> &str;

    fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(self.raw_coords())
    }

    /// Text fields covered by catalog search.
    fn search_fields(&self) -> Vec<&str>;
}

/// Monastery record from `/data/monastery.json`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct PointOfInterest {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "coords", default)]
    pub coordinates: String,
    #[serde(rename = "map_url", default)]
    pub map_url: String,
    #[serde(rename = "embed_link", default)]
    pub embed_html: String,
    #[serde(rename = "s_desc", default)]
    pub short_description: String,
    #[serde(rename = "l_desc", default)]
    pub long_description: String,
    #[serde(default)]
    pub booking: Option<String>,
}

impl PointOfInterest {
    /// True when the record carries an embedded 360° viewer.
    pub fn has_embed(&self) -> bool {
        self.embed_html.to_ascii_lowercase().contains("<iframe")
    }

    /// Blank names or coordinates cannot be listed or mapped.
    pub fn is_listable(&self) -> bool {
        !self.name.trim().is_empty() && !self.coordinates.trim().is_empty()
    }
}

impl Place for PointOfInterest {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn raw_coords(&self) -> &str {
        &self.coordinates
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.short_description, &self.long_description]
    }
}

/// Archive or service record. Both collections share one shape.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SiteRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "coords", default)]
    pub coordinates: String,
    #[serde(rename = "l_desc", default)]
    pub long_description: String,
    #[serde(rename = "s_desc", default)]
    pub short_description: String,
    #[serde(rename = "desc", default)]
    pub description: String,
    #[serde(rename = "map_url", default)]
    pub map_url: String,
}

impl SiteRecord {
    /// Best available text for popups and list rows.
    pub fn summary(&self) -> &str {
        [&self.short_description, &self.description, &self.long_description]
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Place for SiteRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn raw_coords(&self) -> &str {
        &self.coordinates
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            &self.name,
            &self.short_description,
            &self.long_description,
            &self.description,
        ]
    }
}

/// Case-insensitive substring match over a place's searchable text.
/// An empty query matches everything.
pub fn matches_query(place: &dyn Place, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    place
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi_json() -> &'static str {
        r#"{"id":9,"name":"Rumtek Monastery East Sikkim","coords":"27.313,88.605",
            "map_url":"https://maps.example/rumtek","embed_link":"<IFRAME src='x'></IFRAME>",
            "s_desc":"Seat of the Karmapa","l_desc":"Long text"}"#
    }

    #[test]
    fn deserializes_wire_names() {
        let poi: PointOfInterest = serde_json::from_str(poi_json()).unwrap();
        assert_eq!(poi.id, 9);
        assert_eq!(poi.coordinates, "27.313,88.605");
        assert_eq!(poi.short_description, "Seat of the Karmapa");
        assert!(poi.booking.is_none());
        assert!(poi.has_embed());
    }

    #[test]
    fn site_record_defaults_optional_fields() {
        let site: SiteRecord =
            serde_json::from_str(
                r#"{"id":1,"name":"State Library","coords":"27.33,88.61","desc":"Books"}"#,
            )
            .unwrap();
        assert_eq!(site.long_description, "");
        assert_eq!(site.summary(), "Books");
    }

    #[test]
    fn blank_name_is_not_listable() {
        let mut poi: PointOfInterest = serde_json::from_str(poi_json()).unwrap();
        assert!(poi.is_listable());
        poi.name = "   ".into();
        assert!(!poi.is_listable());
    }

    #[test]
    fn query_matches_any_field() {
        let poi: PointOfInterest = serde_json::from_str(poi_json()).unwrap();
        assert!(matches_query(&poi, "karmapa"));
        assert!(matches_query(&poi, "  "));
        assert!(!matches_query(&poi, "pemayangtse"));
    }
}
