use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;

use crate::config::MapConfig;
use crate::models::{Coordinates, GeoBounds};

use super::markers::MarkerSpec;

/// What a marker click selects. Propagated to the host view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    Monastery(i64),
    Archive(i64),
    Service(i64),
}

pub type SelectionCallback = Rc<dyn Fn(SelectionTarget)>;

/// Widget operations the lifecycle controller relies on. The browser
/// implementation drives Leaflet; tests use a recording fake.
pub trait MapBackend {
    /// True when the container exists and has non-zero layout size.
    fn container_ready(&self, container_id: &str) -> bool;

    /// Create the widget inside the container with pan/zoom restrictions applied.
    fn create(&mut self, options: &MapOptions) -> Result<(), MapError>;

    fn is_ready(&self) -> bool;

    /// Remove every marker and its listeners.
    fn clear_markers(&mut self) -> Result<(), MapError>;

    fn add_marker(
        &mut self,
        marker: &MarkerSpec,
        on_select: SelectionCallback,
    ) -> Result<(), MapError>;

    fn add_border(
        &mut self,
        geojson: &serde_json::Value,
        style: &BorderStyle,
    ) -> Result<(), MapError>;

    fn fit_bounds(&mut self, bounds: &GeoBounds, padding_px: f64) -> Result<(), MapError>;

    fn set_view(&mut self, center: Coordinates, zoom: f64) -> Result<(), MapError>;

    fn fly_to(&mut self, center: Coordinates, zoom: f64) -> Result<(), MapError>;

    /// Replace any previous user marker and proximity circle.
    fn show_user_location(
        &mut self,
        position: Coordinates,
        radius_m: f64,
        popup_html: &str,
    ) -> Result<(), MapError>;

    /// Remove the widget and strip library state from the container.
    /// Safe to call without a live widget.
    fn destroy(&mut self, container_id: &str);
}

/// Creation options handed to the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOptions {
    pub container_id: String,
    pub center: Coordinates,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub max_bounds: GeoBounds,
    pub max_bounds_viscosity: f64,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl MapOptions {
    pub fn from_config(config: &MapConfig) -> Self {
        Self {
            container_id: config.container_id.clone(),
            center: Coordinates::new(config.default_center_lat, config.default_center_lng),
            zoom: config.default_zoom,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            max_bounds: GeoBounds::new(
                Coordinates::new(config.bounds_south, config.bounds_west),
                Coordinates::new(config.bounds_north, config.bounds_east),
            ),
            max_bounds_viscosity: 1.0,
            tile_url: config.tile_url.clone(),
            tile_attribution: config.tile_attribution.clone(),
        }
    }
}

/// Path style for the region border overlay, serialized in Leaflet's option names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
    pub dash_array: String,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            color: "#0099FF".to_string(),
            weight: 4.0,
            opacity: 1.0,
            fill_color: "#0066CC".to_string(),
            fill_opacity: 0.15,
            dash_array: "8, 4".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("Map is not ready")]
    NotReady,
    #[error("Map container '{0}' has no layout size")]
    ContainerNotReady(String),
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("Map library error: {0}")]
    Ffi(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_config() {
        let options = MapOptions::from_config(&MapConfig::default());
        assert_eq!(options.min_zoom, 8.0);
        assert_eq!(options.max_zoom, 18.0);
        assert_eq!(options.max_bounds.as_pairs(), [[27.0, 88.0], [28.2, 88.9]]);
        assert_eq!(options.center, Coordinates::new(27.3389, 88.4167));
    }

    #[test]
    fn border_style_uses_leaflet_names() {
        let json = serde_json::to_value(BorderStyle::default()).unwrap();
        assert_eq!(json["fillOpacity"], 0.15);
        assert_eq!(json["dashArray"], "8, 4");
    }
}
