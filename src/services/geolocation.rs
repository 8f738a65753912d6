// ============================================================================
// GEOLOCATION - one-shot, high-accuracy position request
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::PositionOptions;

use crate::config::GeoConfig;
use crate::error::{js_error_message, AppError};
use crate::models::Coordinates;

/// Generation counter. A request is only honoured if no newer request was
/// started and nothing invalidated it (unmount) meanwhile.
#[derive(Clone, Default)]
pub struct LocateToken {
    generation: Rc<Cell<u64>>,
}

impl LocateToken {
    pub fn next(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.get() == ticket
    }

    /// Invalidate every request in flight.
    pub fn invalidate(&self) {
        self.next();
    }
}

/// Map a `GeolocationPositionError.code` to a user-facing message.
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1 => "Location permission was denied.",
        2 => "Your position is currently unavailable.",
        3 => "Timed out while getting your location.",
        _ => "Unable to get your location.",
    }
}

fn error_from_js(value: &JsValue) -> AppError {
    let code = js_sys::Reflect::get(value, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64());
    match code {
        Some(code) => AppError::GeolocationFailure(describe_error_code(code as u16).to_string()),
        None => AppError::GeolocationFailure(js_error_message(value)),
    }
}

fn read_coordinates(position: &JsValue) -> Option<Coordinates> {
    let coords = js_sys::Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = js_sys::Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(Coordinates::new(lat, lng))
}

/// Resolve the device position once.
pub async fn current_position(config: &GeoConfig) -> Result<Coordinates, AppError> {
    let geolocation = web_sys::window()
        .ok_or_else(|| AppError::GeolocationFailure("No window".to_string()))?
        .navigator()
        .geolocation()
        .map_err(|_| {
            AppError::GeolocationFailure(
                "Geolocation is not supported by this browser.".to_string(),
            )
        })?;

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(config.timeout_ms);
    options.set_maximum_age(config.maximum_age_ms);

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let on_error = reject.clone();
        let success = Closure::once_into_js(move |position: JsValue| {
            let _ = resolve.call1(&JsValue::UNDEFINED, &position);
        });
        let failure = Closure::once_into_js(move |error: JsValue| {
            let _ = reject.call1(&JsValue::UNDEFINED, &error);
        });
        if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
            success.unchecked_ref(),
            Some(failure.unchecked_ref()),
            &options,
        ) {
            let _ = on_error.call1(&JsValue::UNDEFINED, &e);
        }
    });

    let position = JsFuture::from(promise).await.map_err(|e| error_from_js(&e))?;
    read_coordinates(&position)
        .ok_or_else(|| AppError::GeolocationFailure("Position had no coordinates.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let token = LocateToken::default();
        let first = token.next();
        let second = token.next();
        assert!(!token.is_current(first));
        assert!(token.is_current(second));
        token.invalidate();
        assert!(!token.is_current(second));
    }

    #[test]
    fn permission_denied_has_clear_message() {
        assert_eq!(describe_error_code(1), "Location permission was denied.");
        assert_eq!(describe_error_code(9), "Unable to get your location.");
    }
}
