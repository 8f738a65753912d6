// ============================================================================
// MONASTERY360 - SIKKIM MONASTERY TOURISM PWA (RUST + WASM)
// ============================================================================
// - Views: functions that build DOM from state
// - ViewModels: UI actions and async orchestration
// - Services: fetch, probing, geolocation, speech, install prompt
// - State: Rc<RefCell> application store
// - Maps: marker derivation and the Leaflet widget lifecycle
// ============================================================================

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod geo;
pub mod maps;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;
pub mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;
use crate::state::UpdateType;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() { log::Level::Info } else { log::Level::Warn };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Monastery360 - Rust + WASM");

    let mut app = App::new()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Full re-render (view switch).
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Apply an update. Incremental updates whose region is missing fall back
/// to a full render.
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|cell| {
        match update_type {
            UpdateType::Incremental(update) => {
                let needs_full_render = match cell.try_borrow() {
                    Ok(app) => match app.as_ref() {
                        Some(app) => match app.update_incremental(update.clone()) {
                            Ok(()) => false,
                            Err(e) => {
                                let message = format!("{:?}", e);
                                if message.contains("needs full render") {
                                    log::info!(
                                        "🔄 [UPDATE] {:?} region missing, full render",
                                        update
                                    );
                                    true
                                } else {
                                    log::error!("❌ [UPDATE] {:?} failed: {}", update, message);
                                    false
                                }
                            }
                        },
                        None => {
                            log::warn!("⚠️ [UPDATE] App not initialized");
                            false
                        }
                    },
                    Err(_) => {
                        log::warn!("⚠️ [UPDATE] {:?} skipped, render in progress", update);
                        false
                    }
                };
                if needs_full_render {
                    if let Ok(mut app) = cell.try_borrow_mut() {
                        if let Some(app) = app.as_mut() {
                            if let Err(e) = app.render() {
                                log::error!("❌ [RERENDER] {:?}", e);
                            }
                        }
                    }
                }
            }
            UpdateType::FullRender => match cell.try_borrow_mut() {
                Ok(mut app) => match app.as_mut() {
                    Some(app) => {
                        if let Err(e) = app.render() {
                            log::error!("❌ [RERENDER] {:?}", e);
                        }
                    }
                    None => log::warn!("⚠️ [RERENDER] App not initialized"),
                },
                Err(_) => log::warn!("⚠️ [RERENDER] Skipped, render in progress"),
            },
        }
    });
}

/// Callable from JavaScript.
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
