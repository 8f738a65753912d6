// ============================================================================
// APP VIEW - header plus the active page
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::{ActiveView, AppState};
use crate::viewmodels::ViewModels;
use crate::views::{
    render_calendar, render_faq, render_guide, render_header, render_info, render_landing,
    render_map_page, render_planner, render_playlist,
};

pub fn render_app(state: &AppState, vms: &ViewModels) -> Result<Element, JsValue> {
    let page = match state.active_view() {
        ActiveView::Landing => render_landing(state)?,
        ActiveView::Map => render_map_page(state, vms)?,
        ActiveView::Planner => render_planner(state, vms)?,
        ActiveView::Calendar => render_calendar(state)?,
        ActiveView::Faq => ElementBuilder::new("div")?
            .class("qna-page")
            .child(render_faq(state)?)?
            .child(render_guide(state, vms)?)?
            .build(),
        ActiveView::Audio => render_playlist(state, vms)?,
        ActiveView::Info => render_info()?,
    };

    Ok(ElementBuilder::new("div")?
        .class("app-shell")
        .child(render_header(state, vms)?)?
        .child(
            ElementBuilder::new("main")?
                .class("app-main")
                .child(page)?
                .build(),
        )?
        .build())
}
