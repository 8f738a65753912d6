// ============================================================================
// APP - owns the store, the viewmodels and the #app root
// ============================================================================

use std::rc::Rc;

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, replace_region, set_inner_html};
use crate::maps::{SelectionCallback, SelectionTarget};
use crate::services::{load_all, ApiClient, Collection, PwaInstallService};
use crate::state::{ActiveView, AppState, IncrementalUpdate, Region, UpdateType};
use crate::viewmodels::{
    DetailViewModel, GuideViewModel, MapViewModel, PlannerViewModel, PlaylistViewModel, ViewModels,
};
use crate::views::{
    render_app, render_calendar, render_catalog_list, render_catalog_tabs, render_detail,
    render_faq_body, render_guide, render_header, render_nearby, render_planner, render_playlist,
    sync_progress, CALENDAR_ID, CATALOG_LIST_ID, CATALOG_TABS_ID, DETAIL_ID, FAQ_ID, GUIDE_ID,
    HEADER_ID, NEARBY_ID, PLANNER_ID, PLAYLIST_ID,
};

/// Local calendar date from the browser clock.
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

fn incremental(update: IncrementalUpdate) {
    crate::rerender_app_with_type(UpdateType::Incremental(update));
}

pub struct App {
    state: AppState,
    vms: ViewModels,
    root: Option<Element>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root =
            get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let state = AppState::new(today());

        let detail = DetailViewModel::new(state.clone());
        let on_select: SelectionCallback = {
            let detail = detail.clone();
            Rc::new(move |target: SelectionTarget| detail.open(target))
        };

        let install = Rc::new(PwaInstallService::new());
        *state.install.borrow_mut() = install.state();

        let vms = ViewModels {
            map: MapViewModel::new(state.clone(), on_select),
            detail,
            planner: PlannerViewModel::new(state.clone()),
            guide: GuideViewModel::new(state.clone()),
            playlist: PlaylistViewModel::new(state.clone()),
            install,
        };

        {
            let state = state.clone();
            vms.install.start(move |install| {
                *state.install.borrow_mut() = install;
                incremental(IncrementalUpdate::Header);
            });
        }
        vms.playlist.start();

        let on_loaded: Rc<dyn Fn(Collection)> = {
            let map = vms.map.clone();
            Rc::new(move |collection| match collection {
                Collection::Monasteries => {
                    map.start_probe();
                    map.refresh_markers();
                    incremental(IncrementalUpdate::Catalog);
                }
                Collection::Archives | Collection::Services => {
                    map.refresh_markers();
                    incremental(IncrementalUpdate::Catalog);
                }
                Collection::Events => incremental(IncrementalUpdate::Calendar),
            })
        };
        load_all(ApiClient::new(), state.data.clone(), on_loaded);

        log::info!("🚀 [APP] Initialized, language {:?}", state.language());
        Ok(Self {
            state,
            vms,
            root: Some(root),
        })
    }

    /// Rebuild the tree. The map widget is torn down first and recreated
    /// once the new container is attached.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let Some(root) = &self.root else {
            return Ok(());
        };
        let view = self.state.active_view();
        log::info!("🎬 [APP] Full render: {:?}", view);

        if self.state.selection().is_none() {
            self.vms.detail.release();
        }
        self.vms.map.unmount();

        set_inner_html(root, "");
        let tree = render_app(&self.state, &self.vms)?;
        append_child(root, &tree)?;

        if view == ActiveView::Map {
            self.vms.map.mount();
        }
        Ok(())
    }

    /// Patch the regions `update` maps to. Errors with "needs full render"
    /// when a region is not on the page.
    pub fn update_incremental(&self, update: IncrementalUpdate) -> Result<(), JsValue> {
        let state = &self.state;
        let vms = &self.vms;

        for region in update.regions(state.active_view()) {
            match region {
                Region::Header => replace_region(HEADER_ID, &render_header(state, vms)?)?,
                Region::CatalogTabs => {
                    replace_region(CATALOG_TABS_ID, &render_catalog_tabs(state)?)?
                }
                Region::CatalogList => {
                    replace_region(CATALOG_LIST_ID, &render_catalog_list(state, vms)?)?
                }
                Region::Detail => replace_region(DETAIL_ID, &render_detail(state, vms)?)?,
                Region::Nearby => replace_region(NEARBY_ID, &render_nearby(state, vms)?)?,
                Region::Planner => replace_region(PLANNER_ID, &render_planner(state, vms)?)?,
                Region::Calendar => replace_region(CALENDAR_ID, &render_calendar(state)?)?,
                Region::Faq => replace_region(FAQ_ID, &render_faq_body(state)?)?,
                Region::Guide => replace_region(GUIDE_ID, &render_guide(state, vms)?)?,
                Region::Playlist => replace_region(PLAYLIST_ID, &render_playlist(state, vms)?)?,
                Region::Progress => sync_progress(vms),
            }
        }
        Ok(())
    }
}
