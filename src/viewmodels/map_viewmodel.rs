// ============================================================================
// MAP VIEWMODEL - map session for one mount of the Explore view
// ============================================================================
// Owns the controller, the mount guard, the probe AbortController and the
// locate token. Every async completion checks the guard before touching the
// controller or the store.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

use crate::config::CONFIG;
use crate::error::AppError;
use crate::geo::{find_nearby, format_distance, NearbyPlace, PlaceKind};
use crate::maps::{
    InitOutcome, LeafletBackend, MapController, MapOptions, RebuildOutcome, SelectionCallback,
    SelectionTarget, MAX_INIT_ATTEMPTS,
};
use crate::models::{Coordinates, Place};
use crate::services::{current_position, probe_interiors, ApiClient, LocateToken, ProbeHandle};
use crate::state::{AppState, DataState, IncrementalUpdate, MountGuard, NearbyStatus, UpdateType};
use crate::utils::html::escape_html;

/// Every place in tie-break order: monasteries, archives, services.
pub fn nearby_places(data: &DataState, origin: &Coordinates, radius_km: f64) -> Vec<NearbyPlace> {
    let monasteries = data.monasteries.borrow();
    let archives = data.archives.borrow();
    let services = data.services.borrow();

    let places = monasteries
        .iter()
        .map(|p| (PlaceKind::Monastery, p as &dyn Place))
        .chain(archives.iter().map(|a| (PlaceKind::Archive, a as &dyn Place)))
        .chain(services.iter().map(|s| (PlaceKind::Service, s as &dyn Place)));

    find_nearby(origin, places, radius_km)
}

pub fn user_popup_html(nearby: &[NearbyPlace], radius_km: f64) -> String {
    if nearby.is_empty() {
        return format!(
            "<strong>You are here</strong><br><em>No attractions within {}.</em>",
            format_distance(radius_km)
        );
    }
    let rows: String = nearby
        .iter()
        .map(|p| {
            format!(
                "<li>{} <small>({}, {})</small></li>",
                escape_html(&p.name),
                p.kind.label(),
                format_distance(p.distance_km)
            )
        })
        .collect();
    format!(
        "<strong>You are here</strong><br>Nearby attractions:<ul class=\"nearby-popup\">{}</ul>",
        rows
    )
}

#[derive(Clone)]
pub struct MapViewModel {
    state: AppState,
    api: ApiClient,
    on_select: SelectionCallback,
    controller: Rc<RefCell<MapController<LeafletBackend>>>,
    guard: Rc<RefCell<MountGuard>>,
    probe: Rc<RefCell<Option<ProbeHandle>>>,
    /// POI revision the last completed probe ran against
    probed_poi_revision: Rc<Cell<Option<u64>>>,
    locate: LocateToken,
}

impl MapViewModel {
    /// `on_select` runs when a marker is clicked.
    pub fn new(state: AppState, on_select: SelectionCallback) -> Self {
        let options = MapOptions::from_config(&CONFIG.map_config);
        let guard = MountGuard::new();
        guard.unmount();
        Self {
            state,
            api: ApiClient::new(),
            on_select,
            controller: Rc::new(RefCell::new(MapController::new(
                LeafletBackend::default(),
                options,
            ))),
            guard: Rc::new(RefCell::new(guard)),
            probe: Rc::new(RefCell::new(None)),
            probed_poi_revision: Rc::new(Cell::new(None)),
            locate: LocateToken::default(),
        }
    }

    fn current_guard(&self) -> MountGuard {
        self.guard.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.guard.borrow().is_mounted()
    }

    /// Call once the map container is in the DOM.
    pub fn mount(&self) {
        if self.is_mounted() {
            return;
        }
        *self.guard.borrow_mut() = MountGuard::new();

        self.controller
            .borrow_mut()
            .set_selection_callback(self.on_select.clone());

        self.try_initialize(self.current_guard());
    }

    fn try_initialize(&self, guard: MountGuard) {
        if !guard.is_mounted() {
            return;
        }
        let outcome = self.controller.borrow_mut().initialize();
        match outcome {
            InitOutcome::Ready => self.on_ready(guard),
            InitOutcome::AlreadyReady => {}
            InitOutcome::RetryLater => {
                let vm = self.clone();
                Timeout::new(CONFIG.map_config.init_retry_delay_ms, move || {
                    vm.try_initialize(guard);
                })
                .forget();
            }
            InitOutcome::GaveUp => {
                let err = AppError::map_init(&CONFIG.map_config.container_id, MAX_INIT_ATTEMPTS);
                log::error!("❌ [MAP] {}", err);
            }
        }
    }

    fn on_ready(&self, guard: MountGuard) {
        self.refresh_markers();
        self.load_border(guard);
        self.start_probe();
    }

    fn load_border(&self, guard: MountGuard) {
        let vm = self.clone();
        spawn_local(async move {
            match vm.api.fetch_border(&CONFIG.map_config.border_path).await {
                Ok(geojson) => {
                    if !guard.is_mounted() {
                        return;
                    }
                    if let Err(e) = vm.controller.borrow_mut().apply_border(&geojson) {
                        log::warn!("⚠️ [MAP] Border overlay not drawn: {}", e);
                    }
                }
                Err(e) => log::warn!("⚠️ [MAP] Border overlay unavailable: {}", e),
            }
        });
    }

    /// Rebuild markers from the current data revision.
    pub fn refresh_markers(&self) {
        let layer = self.state.data.marker_layer();
        let outcome = self.controller.borrow_mut().rebuild_markers(layer);
        if outcome == RebuildOutcome::Stale {
            log::debug!("🗺️ [MAP] Marker refresh skipped, newer layer already queued");
        }
    }

    /// Probe interior assets for the current monastery collection. Any probe
    /// batch still running is aborted first.
    pub fn start_probe(&self) {
        if !self.is_mounted() {
            return;
        }
        let poi_revision = self.state.data.poi_revision();
        if self.probed_poi_revision.get() == Some(poi_revision) {
            return;
        }
        let pois = self.state.data.monasteries.borrow().clone();
        if pois.is_empty() {
            return;
        }

        let handle = ProbeHandle::new();
        let signal = handle.signal();
        if let Some(previous) = self.probe.borrow_mut().replace(handle) {
            previous.abort();
        }

        let guard = self.current_guard();
        let vm = self.clone();
        spawn_local(async move {
            let hits = probe_interiors(&pois, signal).await;
            if !guard.is_mounted() {
                log::info!("🔎 [PROBE] View unmounted, dropping probe results");
                return;
            }
            if vm.state.data.set_interior_ids(hits, poi_revision) {
                vm.probed_poi_revision.set(Some(poi_revision));
                vm.refresh_markers();
                crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Catalog));
            }
        });
    }

    pub fn reset_view(&self) {
        if let Err(e) = self.controller.borrow_mut().reset_view() {
            log::warn!("⚠️ [MAP] Reset view failed: {}", e);
        }
    }

    /// Zoom to a catalog record.
    pub fn center_on(&self, target: SelectionTarget) {
        let data = &self.state.data;
        let coords = match target {
            SelectionTarget::Monastery(id) => data.monastery(id).and_then(|p| p.coordinates()),
            SelectionTarget::Archive(id) => data.archive(id).and_then(|a| a.coordinates()),
            SelectionTarget::Service(id) => data.service(id).and_then(|s| s.coordinates()),
        };
        match coords {
            Some(position) => {
                if let Err(e) = self.controller.borrow_mut().center_on(position) {
                    log::warn!("⚠️ [MAP] Could not center map: {}", e);
                }
            }
            None => log::warn!("⚠️ [MAP] {:?} has no usable coordinates", target),
        }
    }

    /// Request the device position and show nearby places. A newer request
    /// supersedes an older one; failures leave the map untouched.
    pub fn locate(&self) {
        let ticket = self.locate.next();
        *self.state.nearby.borrow_mut() = NearbyStatus::Locating;
        crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::NearbyPanel));

        let guard = self.current_guard();
        let vm = self.clone();
        spawn_local(async move {
            let result = current_position(&CONFIG.geo_config).await;
            if !guard.is_mounted() || !vm.locate.is_current(ticket) {
                return;
            }

            let status = match result {
                Ok(position) => {
                    let radius_km = CONFIG.geo_config.proximity_radius_km;
                    let nearby = nearby_places(&vm.state.data, &position, radius_km);
                    log::info!("📍 [GEO] {} places within {} km", nearby.len(), radius_km);

                    let popup = user_popup_html(&nearby, radius_km);
                    if let Err(e) = vm.controller.borrow_mut().show_user_location(
                        position,
                        radius_km * 1000.0,
                        CONFIG.geo_config.locate_zoom,
                        &popup,
                    ) {
                        log::warn!("⚠️ [GEO] User location not drawn: {}", e);
                    }
                    NearbyStatus::Found(nearby)
                }
                Err(e) => {
                    log::warn!("⚠️ [GEO] {}", e);
                    NearbyStatus::Failed(e.to_string())
                }
            };
            *vm.state.nearby.borrow_mut() = status;
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::NearbyPanel));
        });
    }

    /// Abort in-flight work and tear the widget down. Safe to repeat.
    pub fn unmount(&self) {
        self.guard.borrow().unmount();
        if let Some(handle) = self.probe.borrow_mut().take() {
            handle.abort();
        }
        self.locate.invalidate();
        self.controller.borrow_mut().teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PointOfInterest, SiteRecord};

    fn poi(id: i64, name: &str, coords: &str) -> PointOfInterest {
        PointOfInterest {
            id,
            name: name.to_string(),
            coordinates: coords.to_string(),
            map_url: String::new(),
            embed_html: String::new(),
            short_description: String::new(),
            long_description: String::new(),
            booking: None,
        }
    }

    fn site(id: i64, name: &str, coords: &str) -> SiteRecord {
        SiteRecord {
            id,
            name: name.to_string(),
            coordinates: coords.to_string(),
            long_description: String::new(),
            short_description: String::new(),
            description: String::new(),
            map_url: String::new(),
        }
    }

    #[test]
    fn nearby_spans_all_collections_in_tie_order() {
        let data = DataState::new();
        data.replace_monasteries(vec![poi(1, "Rumtek", "27.3,88.6"), poi(2, "Far", "28.1,88.1")]);
        data.replace_archives(vec![site(10, "Library", "27.3,88.6")]);
        data.replace_services(vec![site(20, "Clinic", "27.301,88.6"), site(21, "Broken", "n/a")]);

        let nearby = nearby_places(&data, &Coordinates::new(27.3, 88.6), 2.0);
        let ids: Vec<(PlaceKind, i64)> = nearby.iter().map(|p| (p.kind, p.id)).collect();
        assert_eq!(
            ids,
            vec![(PlaceKind::Monastery, 1), (PlaceKind::Archive, 10), (PlaceKind::Service, 20)]
        );
    }

    #[test]
    fn popup_lists_distances_and_escapes_names() {
        let nearby = vec![NearbyPlace {
            id: 1,
            name: "<b>Enchey</b>".to_string(),
            kind: PlaceKind::Monastery,
            distance_km: 1.26,
        }];
        let html = user_popup_html(&nearby, 2.0);
        assert!(html.contains("&lt;b&gt;Enchey&lt;/b&gt;"));
        assert!(html.contains("1.3 km"));
    }

    #[test]
    fn empty_popup_mentions_radius() {
        let html = user_popup_html(&[], 2.0);
        assert!(html.contains("No attractions within 2.0 km"));
    }
}
