// ============================================================================
// CATALOG VIEW - tabs, search and the record list beside the map
// ============================================================================
// The search input is rendered once; typing only replaces the tab bar and
// the list so the input keeps focus.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{target_value, ElementBuilder};
use crate::state::{AppState, CatalogTab, IncrementalUpdate, UpdateType};
use crate::utils::html::escape_html;
use crate::viewmodels::catalog_viewmodel::{catalog_entries, count_label, CatalogEntry};
use crate::viewmodels::ViewModels;

pub const CATALOG_TABS_ID: &str = "catalog-tabs";
pub const CATALOG_LIST_ID: &str = "catalog-list";

fn refresh() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Catalog));
}

pub fn render_catalog_tabs(state: &AppState) -> Result<Element, JsValue> {
    let active = state.catalog.borrow().tab;
    let mut tabs = Vec::new();
    for tab in CatalogTab::ALL {
        let state = state.clone();
        tabs.push(
            ElementBuilder::new("button")?
                .class(if tab == active {
                    "catalog-tab catalog-tab--active"
                } else {
                    "catalog-tab"
                })
                .text(tab.label())
                .on_click(move |_| {
                    state.catalog.borrow_mut().tab = tab;
                    refresh();
                })?
                .build(),
        );
    }
    Ok(ElementBuilder::new("div")?
        .id(CATALOG_TABS_ID)
        .class("catalog-tabs")
        .children(tabs)?
        .build())
}

fn render_row(
    entry: &CatalogEntry,
    state: &AppState,
    vms: &ViewModels,
) -> Result<Element, JsValue> {
    let target = entry.target;

    let open_vms = vms.clone();
    let info = ElementBuilder::new("div")?
        .class("catalog-row__info")
        .html(&format!(
            r#"<span class="legend-dot" style="background:{}"></span><strong>{}</strong><p>{}</p>"#,
            entry.category.color(),
            escape_html(&entry.name),
            escape_html(&entry.summary)
        ))
        .on_click(move |_| {
            open_vms.detail.open(target);
        })?
        .build();

    let zoom_vms = vms.clone();
    let zoom = ElementBuilder::new("button")?
        .class("catalog-row__zoom")
        .attr("title", "Show on map")?
        .text("🔍")
        .on_click(move |event| {
            event.stop_propagation();
            zoom_vms.map.center_on(target);
        })?
        .build();

    let selected = state.selection() == Some(target);
    Ok(ElementBuilder::new("li")?
        .class(if selected { "catalog-row catalog-row--selected" } else { "catalog-row" })
        .child(info)?
        .child(zoom)?
        .build())
}

pub fn render_catalog_list(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let catalog = state.catalog.borrow().clone();
    let entries = catalog_entries(&state.data, &catalog);

    let list = ElementBuilder::new("div")?
        .id(CATALOG_LIST_ID)
        .class("catalog-list");
    let count = ElementBuilder::new("p")?
        .class("catalog-count")
        .text(&count_label(catalog.tab, entries.len()))
        .build();

    if entries.is_empty() {
        let empty = ElementBuilder::new("p")?
            .class("catalog-empty")
            .text("No results found.")
            .build();
        return Ok(list.child(count)?.child(empty)?.build());
    }

    let mut rows = Vec::with_capacity(entries.len());
    for entry in &entries {
        rows.push(render_row(entry, state, vms)?);
    }
    let ul = ElementBuilder::new("ul")?
        .class("catalog-rows")
        .children(rows)?
        .build();
    Ok(list.child(count)?.child(ul)?.build())
}

pub fn render_catalog(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let search_state = state.clone();
    let search = ElementBuilder::new("input")?
        .class("catalog-search")
        .attr("type", "search")?
        .attr("placeholder", "Search monasteries, archives, services...")?
        .attr("value", &state.catalog.borrow().search)?
        .on_input(move |event| {
            search_state.catalog.borrow_mut().search = target_value(&event).unwrap_or_default();
            refresh();
        })?
        .build();

    Ok(ElementBuilder::new("aside")?
        .class("catalog")
        .child(render_catalog_tabs(state)?)?
        .child(search)?
        .child(render_catalog_list(state, vms)?)?
        .build())
}
