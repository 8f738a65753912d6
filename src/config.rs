use serde::{Deserialize, Serialize};

/// Build-time application settings. Values come from `option_env!` so a
/// `.env` picked up by `build.rs` can override them without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_base_url: String,
    pub planner_api_url: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub geo_config: GeoConfig,
    pub probe_config: ProbeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_base_url: String::new(),
            planner_api_url: "http://localhost:8000".to_string(),
            enable_logging: true,
            map_config: MapConfig::default(),
            geo_config: GeoConfig::default(),
            probe_config: ProbeConfig::default(),
        }
    }
}

/// Region bounds and pan/zoom restriction policy for the map widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub container_id: String,
    pub default_center_lat: f64,
    pub default_center_lng: f64,
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub bounds_south: f64,
    pub bounds_west: f64,
    pub bounds_north: f64,
    pub bounds_east: f64,
    pub tile_url: String,
    pub tile_attribution: String,
    pub border_path: String,
    pub init_retry_delay_ms: u32,
    /// Leaflet measures the container on creation; it must never collapse to 0.
    pub container_min_height_px: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map-container".to_string(),
            default_center_lat: 27.3389,
            default_center_lng: 88.4167,
            default_zoom: 10.0,
            min_zoom: 8.0,
            max_zoom: 18.0,
            bounds_south: 27.0,
            bounds_west: 88.0,
            bounds_north: 28.2,
            bounds_east: 88.9,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution: "© OpenStreetMap contributors".to_string(),
            border_path: "/coords.txt".to_string(),
            init_retry_delay_ms: 100,
            container_min_height_px: 400,
        }
    }
}

impl MapConfig {
    /// Inline style for the map container. Applied on top of the stylesheet
    /// so the widget gets a size even when the CSS fails to load.
    pub fn container_style(&self) -> String {
        format!(
            "position:relative;width:100%;height:100%;min-height:{}px",
            self.container_min_height_px.max(1)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    pub proximity_radius_km: f64,
    pub timeout_ms: u32,
    pub maximum_age_ms: u32,
    pub locate_zoom: f64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            proximity_radius_km: 2.0,
            timeout_ms: 10_000,
            maximum_age_ms: 60_000,
            locate_zoom: 14.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub monastery_asset_path: String,
    /// Ids whose interior view is an embed, counted as probe hits without a request.
    pub known_interior_ids: Vec<i64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            monastery_asset_path: "/data/monastery".to_string(),
            known_interior_ids: vec![9, 53, 57, 171, 176, 195, 202],
        }
    }
}

impl AppConfig {
    /// Resolve configuration from compile-time environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let map = MapConfig::default();
        let geo = GeoConfig::default();
        let probe = ProbeConfig::default();

        Self {
            data_base_url: option_env!("DATA_BASE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.data_base_url),
            planner_api_url: option_env!("PLANNER_API_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.planner_api_url),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
            map_config: MapConfig {
                container_id: map.container_id,
                default_center_lat: parse_or(
                    option_env!("DEFAULT_MAP_CENTER_LAT"),
                    map.default_center_lat,
                ),
                default_center_lng: parse_or(
                    option_env!("DEFAULT_MAP_CENTER_LNG"),
                    map.default_center_lng,
                ),
                default_zoom: parse_or(option_env!("DEFAULT_MAP_ZOOM"), map.default_zoom),
                min_zoom: parse_or(option_env!("MAP_MIN_ZOOM"), map.min_zoom),
                max_zoom: parse_or(option_env!("MAP_MAX_ZOOM"), map.max_zoom),
                bounds_south: parse_or(option_env!("MAP_BOUNDS_SOUTH"), map.bounds_south),
                bounds_west: parse_or(option_env!("MAP_BOUNDS_WEST"), map.bounds_west),
                bounds_north: parse_or(option_env!("MAP_BOUNDS_NORTH"), map.bounds_north),
                bounds_east: parse_or(option_env!("MAP_BOUNDS_EAST"), map.bounds_east),
                tile_url: option_env!("MAP_TILE_URL")
                    .map(str::to_string)
                    .unwrap_or(map.tile_url),
                tile_attribution: map.tile_attribution,
                border_path: option_env!("MAP_BORDER_PATH")
                    .map(str::to_string)
                    .unwrap_or(map.border_path),
                init_retry_delay_ms: parse_or(
                    option_env!("MAP_INIT_RETRY_DELAY_MS"),
                    map.init_retry_delay_ms,
                ),
                container_min_height_px: parse_or(
                    option_env!("MAP_MIN_HEIGHT_PX"),
                    map.container_min_height_px,
                ),
            },
            geo_config: GeoConfig {
                proximity_radius_km: parse_or(
                    option_env!("PROXIMITY_RADIUS_KM"),
                    geo.proximity_radius_km,
                ),
                timeout_ms: parse_or(option_env!("GEOLOCATION_TIMEOUT_MS"), geo.timeout_ms),
                maximum_age_ms: parse_or(
                    option_env!("GEOLOCATION_MAX_AGE_MS"),
                    geo.maximum_age_ms,
                ),
                locate_zoom: geo.locate_zoom,
            },
            probe_config: ProbeConfig {
                monastery_asset_path: probe.monastery_asset_path,
                known_interior_ids: option_env!("KNOWN_INTERIOR_IDS")
                    .map(parse_id_list)
                    .unwrap_or(probe.known_interior_ids),
            },
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

/// Comma separated ids, invalid entries skipped.
fn parse_id_list(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_container_always_has_height() {
        let mut map = MapConfig::default();
        assert!(map.container_style().contains("min-height:400px"));
        map.container_min_height_px = 0;
        assert!(map.container_style().ends_with("min-height:1px"));
    }

    #[test]
    fn id_list_skips_garbage() {
        assert_eq!(parse_id_list("9, 53,abc,,202"), vec![9, 53, 202]);
    }

    #[test]
    fn parse_or_falls_back() {
        assert_eq!(parse_or(Some("12.5"), 1.0), 12.5);
        assert_eq!(parse_or(Some("nope"), 1.0), 1.0);
        assert_eq!(parse_or::<u32>(None, 7), 7);
    }
}
