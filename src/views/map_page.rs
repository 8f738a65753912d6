// ============================================================================
// MAP PAGE VIEW - catalog, map container, legend and map actions
// ============================================================================
// The map container itself is never replaced by incremental updates; only
// the regions around it are. The widget is created after the page is in the
// DOM (see App::render).
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::ElementBuilder;
use crate::maps::MarkerCategory;
use crate::state::AppState;
use crate::viewmodels::ViewModels;
use crate::views::{render_catalog, render_detail, render_nearby};

fn render_legend() -> Result<Element, JsValue> {
    let items: String = MarkerCategory::ALL
        .iter()
        .map(|c| {
            format!(
                r#"<li><span class="legend-dot" style="background:{}"></span>{}</li>"#,
                c.color(),
                c.legend_label()
            )
        })
        .collect();
    Ok(ElementBuilder::new("ul")?
        .class("map-legend")
        .html(&items)
        .build())
}

fn render_map_actions(vms: &ViewModels) -> Result<Element, JsValue> {
    let reset_vms = vms.clone();
    let reset = ElementBuilder::new("button")?
        .class("map-action")
        .attr("title", "Reset view")?
        .text("⟲ Reset view")
        .on_click(move |_| reset_vms.map.reset_view())?
        .build();

    let locate_vms = vms.clone();
    let locate = ElementBuilder::new("button")?
        .class("map-action map-action--locate")
        .attr("title", "Find attractions near me")?
        .text("📍 Near me")
        .on_click(move |_| locate_vms.map.locate())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("map-actions")
        .child(reset)?
        .child(locate)?
        .build())
}

pub fn render_map_page(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .id(&CONFIG.map_config.container_id)
        .class("map-container")
        .attr("style", &CONFIG.map_config.container_style())?
        .build();

    let stage = ElementBuilder::new("div")?
        .class("map-stage")
        .child(container)?
        .child(render_map_actions(vms)?)?
        .child(render_legend()?)?
        .child(render_nearby(state, vms)?)?
        .child(render_detail(state, vms)?)?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("map-page")
        .child(render_catalog(state, vms)?)?
        .child(stage)?
        .build())
}
