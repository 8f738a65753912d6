use thiserror::Error;
use wasm_bindgen::JsValue;

/// Application level failures. Each kind has its own degradation policy:
/// fetches fall back to empty data, map init retries once, geolocation and
/// planner failures are shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("failed to fetch {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    #[error("map container not ready: {0}")]
    MapInitFailure(String),

    #[error("unable to get your location: {0}")]
    GeolocationFailure(String),

    #[error("trip plan generation failed: {0}")]
    PlanGenerationFailure(String),
}

impl AppError {
    /// The container never got a layout within the allowed attempts.
    pub fn map_init(container_id: &str, attempts: u32) -> Self {
        AppError::MapInitFailure(format!(
            "#{} has no size after {} attempts",
            container_id, attempts
        ))
    }

    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        AppError::FetchFailure {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Convert a thrown JS value into a readable message.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_message_names_url() {
        let err = AppError::fetch("/data/monastery.json", "HTTP 500");
        assert_eq!(err.to_string(), "failed to fetch /data/monastery.json: HTTP 500");
    }

    #[test]
    fn map_init_failure_names_container() {
        let err = AppError::map_init("map-container", 2);
        assert_eq!(
            err.to_string(),
            "map container not ready: #map-container has no size after 2 attempts"
        );
    }
}
