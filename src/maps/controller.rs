use std::rc::Rc;

use log::{info, warn};

use crate::models::{Coordinates, GeoBounds};

use super::border::geojson_bounds;
use super::markers::MarkerLayer;
use super::traits::{
    BorderStyle, MapBackend, MapError, MapOptions, SelectionCallback, SelectionTarget,
};

/// Creation is attempted at most this many times per mount cycle.
pub const MAX_INIT_ATTEMPTS: u32 = 2;
pub const BORDER_PADDING_PX: f64 = 20.0;
pub const RECORD_ZOOM: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    Ready,
    AlreadyReady,
    /// Container had no layout; the caller should retry after a delay.
    RetryLater,
    /// Attempts exhausted; prior state left as is.
    GaveUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Applied,
    /// Widget not ready yet; kept and applied on successful init.
    Deferred,
    /// A newer revision was already applied or is pending.
    Stale,
}

/// Owns the single widget instance bound to the map container and keeps its
/// marker layer in sync with the latest data revision.
pub struct MapController<B: MapBackend> {
    backend: B,
    options: MapOptions,
    on_select: Option<SelectionCallback>,
    initialized: bool,
    init_attempts: u32,
    applied_revision: Option<u64>,
    /// Markers the widget refused during the last render
    failed_markers: usize,
    pending: Option<MarkerLayer>,
    border_bounds: Option<GeoBounds>,
}

impl<B: MapBackend> MapController<B> {
    pub fn new(backend: B, options: MapOptions) -> Self {
        Self {
            backend,
            options,
            on_select: None,
            initialized: false,
            init_attempts: 0,
            applied_revision: None,
            failed_markers: 0,
            pending: None,
            border_bounds: None,
        }
    }

    pub fn set_selection_callback(&mut self, callback: SelectionCallback) {
        self.on_select = Some(callback);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized && self.backend.is_ready()
    }

    pub fn applied_revision(&self) -> Option<u64> {
        self.applied_revision
    }

    pub fn failed_markers(&self) -> usize {
        self.failed_markers
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn initialize(&mut self) -> InitOutcome {
        if self.initialized {
            return InitOutcome::AlreadyReady;
        }
        if self.init_attempts >= MAX_INIT_ATTEMPTS {
            return InitOutcome::GaveUp;
        }
        self.init_attempts += 1;

        let container_id = self.options.container_id.clone();
        let result = if self.backend.container_ready(&container_id) {
            // A half-built widget from an earlier failure must not linger
            self.backend.destroy(&container_id);
            self.backend.create(&self.options)
        } else {
            Err(MapError::ContainerNotReady(container_id.clone()))
        };

        if let Err(e) = result {
            if self.init_attempts < MAX_INIT_ATTEMPTS {
                info!("🗺️ [MAP] Init attempt {} failed ({}), retrying", self.init_attempts, e);
                return InitOutcome::RetryLater;
            }
            warn!(
                "🗺️ [MAP] Giving up on map init after {} attempts: {}",
                self.init_attempts, e
            );
            self.backend.destroy(&container_id);
            return InitOutcome::GaveUp;
        }

        self.initialized = true;
        info!("🗺️ [MAP] Map created in #{}", container_id);

        if let Some(layer) = self.pending.take() {
            if let Err(e) = self.render_layer(&layer) {
                warn!("🗺️ [MAP] Pending marker layer failed to render: {}", e);
            }
        }
        InitOutcome::Ready
    }

    /// Clear and repopulate the marker layer. Older revisions are rejected.
    pub fn rebuild_markers(&mut self, layer: MarkerLayer) -> RebuildOutcome {
        let newest_seen = self
            .applied_revision
            .into_iter()
            .chain(self.pending.as_ref().map(|p| p.revision))
            .max();
        if newest_seen.map_or(false, |seen| layer.revision < seen) {
            info!(
                "🗺️ [MAP] Dropping stale marker layer r{} (have r{:?})",
                layer.revision, newest_seen
            );
            return RebuildOutcome::Stale;
        }

        if !self.is_initialized() {
            self.pending = Some(layer);
            return RebuildOutcome::Deferred;
        }

        match self.render_layer(&layer) {
            Ok(()) => RebuildOutcome::Applied,
            Err(e) => {
                warn!("🗺️ [MAP] Marker rebuild failed: {}", e);
                RebuildOutcome::Applied
            }
        }
    }

    fn render_layer(&mut self, layer: &MarkerLayer) -> Result<(), MapError> {
        self.backend.clear_markers()?;
        self.applied_revision = Some(layer.revision);

        let on_select: SelectionCallback = match &self.on_select {
            Some(callback) => callback.clone(),
            None => Rc::new(|_: SelectionTarget| {}),
        };
        let mut failed = 0;
        for marker in &layer.markers {
            if let Err(e) = self.backend.add_marker(marker, on_select.clone()) {
                warn!("🗺️ [MAP] Marker {:?} not added: {}", marker.target, e);
                failed += 1;
            }
        }
        self.failed_markers = failed;
        info!(
            "🗺️ [MAP] Rendered {} markers (r{}, {} skipped)",
            layer.markers.len() - failed,
            layer.revision,
            layer.skipped + failed
        );
        Ok(())
    }

    /// Draw the region outline and fit it. Absence of the overlay is non-fatal.
    pub fn apply_border(&mut self, geojson: &serde_json::Value) -> Result<(), MapError> {
        if !self.is_initialized() {
            return Err(MapError::NotReady);
        }
        self.backend.add_border(geojson, &BorderStyle::default())?;
        if let Some(bounds) = geojson_bounds(geojson) {
            self.backend.fit_bounds(&bounds, BORDER_PADDING_PX)?;
            self.border_bounds = Some(bounds);
        }
        Ok(())
    }

    /// Fit the region border if loaded, else go back to the default view.
    pub fn reset_view(&mut self) -> Result<(), MapError> {
        if !self.is_initialized() {
            return Err(MapError::NotReady);
        }
        match self.border_bounds {
            Some(bounds) => self.backend.fit_bounds(&bounds, BORDER_PADDING_PX),
            None => self.backend.set_view(self.options.center, self.options.zoom),
        }
    }

    pub fn center_on(&mut self, position: Coordinates) -> Result<(), MapError> {
        if !self.is_initialized() {
            return Err(MapError::NotReady);
        }
        check_position(&position)?;
        self.backend.set_view(position, RECORD_ZOOM)
    }

    pub fn show_user_location(
        &mut self,
        position: Coordinates,
        radius_m: f64,
        zoom: f64,
        popup_html: &str,
    ) -> Result<(), MapError> {
        if !self.is_initialized() {
            return Err(MapError::NotReady);
        }
        check_position(&position)?;
        self.backend.show_user_location(position, radius_m, popup_html)?;
        self.backend.fly_to(position, zoom)
    }

    /// Remove the widget. Safe with no live widget and safe to repeat.
    pub fn teardown(&mut self) {
        self.backend.destroy(&self.options.container_id);
        if self.initialized {
            info!("🗺️ [MAP] Map torn down");
        }
        self.initialized = false;
        self.init_attempts = 0;
        self.applied_revision = None;
        self.failed_markers = 0;
        self.pending = None;
        self.border_bounds = None;
    }
}

fn check_position(position: &Coordinates) -> Result<(), MapError> {
    if position.is_valid() {
        Ok(())
    } else {
        Err(MapError::InvalidCoordinates(format!(
            "{},{}",
            position.latitude, position.longitude
        )))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::maps::markers::{MarkerCategory, MarkerSpec};
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Create,
        ClearMarkers,
        AddMarker(SelectionTarget),
        AddBorder,
        FitBounds(f64),
        SetView(f64),
        FlyTo(f64),
        UserLocation(f64),
        Destroy,
    }

    /// Records every widget call. Each layout check consumes one scripted
    /// answer; once exhausted the container reports ready.
    #[derive(Default)]
    pub struct FakeBackend {
        pub calls: Vec<Call>,
        pub layout: Vec<bool>,
        pub layout_checks: Cell<usize>,
        pub live: bool,
        pub markers: usize,
        pub callbacks: Vec<SelectionCallback>,
        /// Targets whose `add_marker` fails
        pub rejects: Vec<SelectionTarget>,
    }

    impl FakeBackend {
        pub fn with_layout(ready: &[bool]) -> Self {
            Self {
                layout: ready.to_vec(),
                ..Default::default()
            }
        }

        fn count(&self, call: &Call) -> usize {
            self.calls.iter().filter(|c| *c == call).count()
        }
    }

    impl MapBackend for FakeBackend {
        fn container_ready(&self, _container_id: &str) -> bool {
            let n = self.layout_checks.get();
            self.layout_checks.set(n + 1);
            self.layout.get(n).copied().unwrap_or(true)
        }

        fn create(&mut self, _options: &MapOptions) -> Result<(), MapError> {
            self.calls.push(Call::Create);
            self.live = true;
            Ok(())
        }

        fn is_ready(&self) -> bool {
            self.live
        }

        fn clear_markers(&mut self) -> Result<(), MapError> {
            self.calls.push(Call::ClearMarkers);
            self.markers = 0;
            self.callbacks.clear();
            Ok(())
        }

        fn add_marker(
            &mut self,
            marker: &MarkerSpec,
            on_select: SelectionCallback,
        ) -> Result<(), MapError> {
            self.calls.push(Call::AddMarker(marker.target));
            if self.rejects.contains(&marker.target) {
                return Err(MapError::Ffi("marker rejected".to_string()));
            }
            self.markers += 1;
            self.callbacks.push(on_select);
            Ok(())
        }

        fn add_border(
            &mut self,
            _geojson: &serde_json::Value,
            _style: &BorderStyle,
        ) -> Result<(), MapError> {
            self.calls.push(Call::AddBorder);
            Ok(())
        }

        fn fit_bounds(&mut self, _bounds: &GeoBounds, padding_px: f64) -> Result<(), MapError> {
            self.calls.push(Call::FitBounds(padding_px));
            Ok(())
        }

        fn set_view(&mut self, _center: Coordinates, zoom: f64) -> Result<(), MapError> {
            self.calls.push(Call::SetView(zoom));
            Ok(())
        }

        fn fly_to(&mut self, _center: Coordinates, zoom: f64) -> Result<(), MapError> {
            self.calls.push(Call::FlyTo(zoom));
            Ok(())
        }

        fn show_user_location(
            &mut self,
            _position: Coordinates,
            radius_m: f64,
            _popup_html: &str,
        ) -> Result<(), MapError> {
            self.calls.push(Call::UserLocation(radius_m));
            Ok(())
        }

        fn destroy(&mut self, _container_id: &str) {
            self.calls.push(Call::Destroy);
            self.live = false;
            self.markers = 0;
            self.callbacks.clear();
        }
    }

    fn controller(layout: &[bool]) -> MapController<FakeBackend> {
        MapController::new(
            FakeBackend::with_layout(layout),
            MapOptions::from_config(&MapConfig::default()),
        )
    }

    fn marker(id: i64) -> MarkerSpec {
        MarkerSpec {
            target: SelectionTarget::Monastery(id),
            category: MarkerCategory::Standard,
            position: Coordinates::new(27.3, 88.4),
            title: format!("M{id}"),
            popup_html: String::new(),
        }
    }

    fn layer(revision: u64, ids: &[i64]) -> MarkerLayer {
        MarkerLayer {
            revision,
            markers: ids.iter().map(|id| marker(*id)).collect(),
            skipped: 0,
        }
    }

    #[test]
    fn teardown_is_safe_without_instance_and_twice() {
        let mut c = controller(&[]);
        c.teardown();
        c.teardown();
        assert!(!c.is_initialized());

        assert_eq!(c.initialize(), InitOutcome::Ready);
        c.teardown();
        c.teardown();
        assert!(!c.is_initialized());
        assert!(!c.backend().live);
    }

    #[test]
    fn init_retries_exactly_once() {
        let mut c = controller(&[false, true]);
        assert_eq!(c.initialize(), InitOutcome::RetryLater);
        assert_eq!(c.initialize(), InitOutcome::Ready);
        assert_eq!(c.initialize(), InitOutcome::AlreadyReady);
        assert_eq!(c.backend().count(&Call::Create), 1);

        let mut never = controller(&[false, false, true]);
        assert_eq!(never.initialize(), InitOutcome::RetryLater);
        assert_eq!(never.initialize(), InitOutcome::GaveUp);
        assert_eq!(never.initialize(), InitOutcome::GaveUp);
        assert_eq!(never.backend().count(&Call::Create), 0);
    }

    #[test]
    fn pending_layer_applied_on_init() {
        let mut c = controller(&[]);
        assert_eq!(c.rebuild_markers(layer(1, &[1, 2])), RebuildOutcome::Deferred);
        assert_eq!(c.backend().markers, 0);
        assert_eq!(c.initialize(), InitOutcome::Ready);
        assert_eq!(c.backend().markers, 2);
        assert_eq!(c.applied_revision(), Some(1));
    }

    #[test]
    fn rebuild_is_idempotent_and_never_recreates_widget() {
        let mut c = controller(&[]);
        c.initialize();
        assert_eq!(c.rebuild_markers(layer(2, &[1, 2, 3])), RebuildOutcome::Applied);
        assert_eq!(c.rebuild_markers(layer(2, &[1, 2, 3])), RebuildOutcome::Applied);
        assert_eq!(c.backend().markers, 3);
        assert_eq!(c.backend().callbacks.len(), 3);
        assert_eq!(c.backend().count(&Call::Create), 1);
        assert_eq!(c.backend().count(&Call::ClearMarkers), 2);
    }

    #[test]
    fn stale_rebuild_is_rejected() {
        let mut c = controller(&[]);
        c.initialize();
        c.rebuild_markers(layer(5, &[1, 2]));
        assert_eq!(c.rebuild_markers(layer(4, &[9])), RebuildOutcome::Stale);
        assert_eq!(c.backend().markers, 2);
        assert_eq!(c.applied_revision(), Some(5));
    }

    #[test]
    fn stale_rebuild_rejected_against_pending() {
        let mut c = controller(&[]);
        c.rebuild_markers(layer(3, &[1]));
        assert_eq!(c.rebuild_markers(layer(2, &[1, 2])), RebuildOutcome::Stale);
        c.initialize();
        assert_eq!(c.backend().markers, 1);
    }

    #[test]
    fn marker_click_reaches_selection_callback() {
        let selected = Rc::new(RefCell::new(None));
        let sink = selected.clone();
        let mut c = controller(&[]);
        c.set_selection_callback(Rc::new(move |target| *sink.borrow_mut() = Some(target)));
        c.initialize();
        c.rebuild_markers(layer(1, &[7]));
        (c.backend().callbacks[0])(SelectionTarget::Monastery(7));
        assert_eq!(*selected.borrow(), Some(SelectionTarget::Monastery(7)));
    }

    #[test]
    fn reset_view_prefers_border_bounds() {
        let mut c = controller(&[]);
        assert_eq!(c.reset_view(), Err(MapError::NotReady));
        c.initialize();
        c.reset_view().unwrap();
        assert_eq!(c.backend().calls.last(), Some(&Call::SetView(10.0)));

        let border = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[88.0, 27.0], [88.9, 28.2]]]
        });
        c.apply_border(&border).unwrap();
        c.reset_view().unwrap();
        assert_eq!(c.backend().calls.last(), Some(&Call::FitBounds(BORDER_PADDING_PX)));
    }

    #[test]
    fn user_location_needs_live_map() {
        let mut c = controller(&[]);
        let pos = Coordinates::new(27.3, 88.6);
        assert_eq!(c.show_user_location(pos, 2000.0, 14.0, ""), Err(MapError::NotReady));
        assert!(c.backend().calls.is_empty());

        c.initialize();
        c.show_user_location(pos, 2000.0, 14.0, "").unwrap();
        assert!(c.backend().calls.ends_with(&[Call::UserLocation(2000.0), Call::FlyTo(14.0)]));
    }

    #[test]
    fn center_on_uses_record_zoom() {
        let mut c = controller(&[]);
        c.initialize();
        c.center_on(Coordinates::new(27.3, 88.6)).unwrap();
        assert_eq!(c.backend().calls.last(), Some(&Call::SetView(RECORD_ZOOM)));
    }

    #[test]
    fn failing_marker_does_not_drop_the_rest() {
        let mut c = controller(&[]);
        c.backend.rejects = vec![SelectionTarget::Monastery(2)];
        c.initialize();
        assert_eq!(c.rebuild_markers(layer(1, &[1, 2, 3])), RebuildOutcome::Applied);
        assert_eq!(c.backend().markers, 2);
        assert_eq!(c.backend().count(&Call::AddMarker(SelectionTarget::Monastery(3))), 1);
        assert_eq!(c.failed_markers(), 1);
        assert_eq!(c.applied_revision(), Some(1));
    }

    #[test]
    fn invalid_positions_never_reach_the_widget() {
        let mut c = controller(&[]);
        c.initialize();
        let calls_before = c.backend().calls.len();
        assert!(matches!(
            c.center_on(Coordinates::new(f64::NAN, 88.6)),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            c.show_user_location(Coordinates::new(95.0, 88.6), 2000.0, 14.0, ""),
            Err(MapError::InvalidCoordinates(_))
        ));
        assert_eq!(c.backend().calls.len(), calls_before);
    }
}
