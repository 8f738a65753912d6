// Forwards Monastery360 settings from an optional `.env` file to `option_env!`
// in src/config.rs. Process environment takes precedence over the file.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

const SETTINGS: &[&str] = &[
    "DATA_BASE_URL",
    "PLANNER_API_URL",
    "ENABLE_LOGGING",
    "DEFAULT_MAP_CENTER_LAT",
    "DEFAULT_MAP_CENTER_LNG",
    "DEFAULT_MAP_ZOOM",
    "MAP_MIN_ZOOM",
    "MAP_MAX_ZOOM",
    "MAP_BOUNDS_SOUTH",
    "MAP_BOUNDS_WEST",
    "MAP_BOUNDS_NORTH",
    "MAP_BOUNDS_EAST",
    "MAP_TILE_URL",
    "MAP_BORDER_PATH",
    "MAP_INIT_RETRY_DELAY_MS",
    "MAP_MIN_HEIGHT_PX",
    "PROXIMITY_RADIUS_KM",
    "GEOLOCATION_TIMEOUT_MS",
    "GEOLOCATION_MAX_AGE_MS",
    "KNOWN_INTERIOR_IDS",
];

/// `KEY=VALUE` lines; `export ` prefixes and surrounding quotes are dropped.
fn parse_dotenv(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for key in SETTINGS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    let Ok(contents) = fs::read_to_string(env_file) else {
        return;
    };
    println!("cargo:rerun-if-changed=.env");

    for (key, value) in parse_dotenv(&contents) {
        if !SETTINGS.contains(&key.as_str()) {
            println!("cargo:warning=.env: unknown setting {} ignored", key);
            continue;
        }
        if env::var(&key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
