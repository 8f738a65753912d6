// ============================================================================
// DATA STATE - fetched collections + data revision
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use crate::maps::{build_marker_layer, MarkerLayer};
use crate::models::{FestivalEvent, PointOfInterest, SiteRecord};

/// Collections are replaced wholesale, never patched. Every replacement and
/// every category update bumps `revision`; `poi_revision` only moves when the
/// monastery collection itself is replaced, so probe results can be matched
/// to the collection they were started against.
#[derive(Clone, Default)]
pub struct DataState {
    pub monasteries: Rc<RefCell<Vec<PointOfInterest>>>,
    pub archives: Rc<RefCell<Vec<SiteRecord>>>,
    pub services: Rc<RefCell<Vec<SiteRecord>>>,
    pub events: Rc<RefCell<Vec<FestivalEvent>>>,
    pub interior_ids: Rc<RefCell<HashSet<i64>>>,
    revision: Rc<Cell<u64>>,
    poi_revision: Rc<Cell<u64>>,
}

impl DataState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn poi_revision(&self) -> u64 {
        self.poi_revision.get()
    }

    fn bump(&self) -> u64 {
        let next = self.revision.get() + 1;
        self.revision.set(next);
        next
    }

    /// Drops records that can be neither listed nor mapped. Clears interior
    /// ids, which belonged to the previous collection.
    pub fn replace_monasteries(&self, records: Vec<PointOfInterest>) -> u64 {
        let total = records.len();
        let kept: Vec<PointOfInterest> = records.into_iter().filter(|p| p.is_listable()).collect();
        if kept.len() < total {
            log::info!("📦 [DATA] Dropped {} unlistable monastery records", total - kept.len());
        }
        *self.monasteries.borrow_mut() = kept;
        self.interior_ids.borrow_mut().clear();
        self.poi_revision.set(self.poi_revision.get() + 1);
        self.bump()
    }

    pub fn replace_archives(&self, records: Vec<SiteRecord>) -> u64 {
        *self.archives.borrow_mut() = records;
        self.bump()
    }

    pub fn replace_services(&self, records: Vec<SiteRecord>) -> u64 {
        *self.services.borrow_mut() = records;
        self.bump()
    }

    /// Events do not feed the map, so they leave the revision alone.
    pub fn replace_events(&self, records: Vec<FestivalEvent>) {
        *self.events.borrow_mut() = records;
    }

    /// Apply probe results. Returns `false` (and changes nothing) when the
    /// monastery collection was replaced after the probe started.
    pub fn set_interior_ids(&self, ids: HashSet<i64>, started_at_poi_revision: u64) -> bool {
        if started_at_poi_revision != self.poi_revision.get() {
            log::info!(
                "🔎 [PROBE] Discarding results for stale collection (p{} != p{})",
                started_at_poi_revision,
                self.poi_revision.get()
            );
            return false;
        }
        *self.interior_ids.borrow_mut() = ids;
        self.bump();
        true
    }

    /// Derive the marker layer for the current revision.
    pub fn marker_layer(&self) -> MarkerLayer {
        build_marker_layer(
            self.revision(),
            &self.monasteries.borrow(),
            &self.archives.borrow(),
            &self.services.borrow(),
            &self.interior_ids.borrow(),
        )
    }

    pub fn monastery(&self, id: i64) -> Option<PointOfInterest> {
        self.monasteries.borrow().iter().find(|p| p.id == id).cloned()
    }

    pub fn archive(&self, id: i64) -> Option<SiteRecord> {
        self.archives.borrow().iter().find(|s| s.id == id).cloned()
    }

    pub fn service(&self, id: i64) -> Option<SiteRecord> {
        self.services.borrow().iter().find(|s| s.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::MarkerCategory;

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

    #[test]
    fn every_replacement_bumps_revision() {
        let data = DataState::new();
        let r1 = data.replace_monasteries(vec![poi(1, "A", "27.3,88.4")]);
        let r2 = data.replace_archives(vec![]);
        let r3 = data.replace_services(vec![]);
        assert!(r1 < r2 && r2 < r3);
        data.replace_events(vec![]);
        assert_eq!(data.revision(), r3);
    }

    #[test]
    fn blank_records_are_dropped_on_load() {
        let data = DataState::new();
        data.replace_monasteries(vec![
            poi(1, "Rumtek", "27.3,88.6"),
            poi(2, "  ", "27.3,88.6"),
            poi(3, "Enchey", " "),
        ]);
        let ids: Vec<i64> = data.monasteries.borrow().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn probe_results_for_replaced_collection_are_discarded() {
        let data = DataState::new();
        data.replace_monasteries(vec![poi(42, "A", "27.30,88.40")]);
        let started = data.poi_revision();

        data.replace_monasteries(vec![poi(43, "B", "27.31,88.41")]);
        let before = data.revision();
        assert!(!data.set_interior_ids(HashSet::from([42]), started));
        assert_eq!(data.revision(), before);
        assert!(data.interior_ids.borrow().is_empty());

        assert!(data.set_interior_ids(HashSet::from([43]), data.poi_revision()));
        assert_eq!(data.revision(), before + 1);
        assert_eq!(data.marker_layer().count(MarkerCategory::Interior), 1);
    }

    #[test]
    fn archive_changes_do_not_stale_probes() {
        let data = DataState::new();
        data.replace_monasteries(vec![poi(42, "A", "27.30,88.40")]);
        let started = data.poi_revision();
        data.replace_archives(vec![]);
        assert!(data.set_interior_ids(HashSet::from([42]), started));
    }

    #[test]
    fn layer_revision_tracks_data() {
        let data = DataState::new();
        data.replace_monasteries(vec![poi(1, "A", "27.3,88.4")]);
        assert_eq!(data.marker_layer().revision, data.revision());
    }
}
