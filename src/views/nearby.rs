// ============================================================================
// NEARBY PANEL VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::ElementBuilder;
use crate::geo::{format_distance, PlaceKind};
use crate::maps::SelectionTarget;
use crate::state::{AppState, IncrementalUpdate, NearbyStatus, UpdateType};
use crate::viewmodels::ViewModels;

pub const NEARBY_ID: &str = "nearby-region";

fn target_for(kind: PlaceKind, id: i64) -> SelectionTarget {
    match kind {
        PlaceKind::Monastery => SelectionTarget::Monastery(id),
        PlaceKind::Archive => SelectionTarget::Archive(id),
        PlaceKind::Service => SelectionTarget::Service(id),
    }
}

pub fn render_nearby(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let panel = ElementBuilder::new("section")?
        .id(NEARBY_ID)
        .class("nearby-panel");
    let status = state.nearby.borrow().clone();

    let body = match status {
        NearbyStatus::Hidden => return Ok(panel.class("nearby-panel nearby-panel--hidden").build()),
        NearbyStatus::Locating => ElementBuilder::new("p")?
            .class("nearby-status")
            .text("📍 Finding your location...")
            .build(),
        NearbyStatus::Failed(message) => ElementBuilder::new("p")?
            .class("nearby-status nearby-status--error")
            .text(&message)
            .build(),
        NearbyStatus::Found(places) if places.is_empty() => ElementBuilder::new("p")?
            .class("nearby-status")
            .text(&format!(
                "No attractions within {}.",
                format_distance(CONFIG.geo_config.proximity_radius_km)
            ))
            .build(),
        NearbyStatus::Found(places) => {
            let mut rows = Vec::with_capacity(places.len());
            for place in places {
                let target = target_for(place.kind, place.id);
                let vms = vms.clone();
                rows.push(
                    ElementBuilder::new("li")?
                        .class("nearby-row")
                        .text(&format!(
                            "{} · {} · {}",
                            place.name,
                            place.kind.label(),
                            format_distance(place.distance_km)
                        ))
                        .on_click(move |_| vms.detail.open(target))?
                        .build(),
                );
            }
            ElementBuilder::new("ul")?
                .class("nearby-rows")
                .children(rows)?
                .build()
        }
    };

    let close_state = state.clone();
    let close = ElementBuilder::new("button")?
        .class("nearby-close")
        .attr("aria-label", "Close")?
        .text("✕")
        .on_click(move |_| {
            *close_state.nearby.borrow_mut() = NearbyStatus::Hidden;
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::NearbyPanel));
        })?
        .build();

    Ok(panel
        .child(
            ElementBuilder::new("h3")?
                .text("Nearby attractions")
                .build(),
        )?
        .child(close)?
        .child(body)?
        .build())
}
