// ============================================================================
// DATA LOADER - independent fetch of every static collection
// ============================================================================
// One task per collection. A failing fetch degrades its collection to empty
// and never blocks the others.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::error::AppError;
use crate::services::api_client::ApiClient;
use crate::state::DataState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Monasteries,
    Archives,
    Services,
    Events,
}

/// Unwrap a fetch result, logging and degrading failures to empty.
pub fn or_empty<T>(collection: Collection, result: Result<Vec<T>, AppError>) -> Vec<T> {
    match result {
        Ok(records) => {
            log::info!("📦 [DATA] Loaded {} {:?}", records.len(), collection);
            records
        }
        Err(e) => {
            log::error!("❌ [DATA] {:?} unavailable, using empty collection: {}", collection, e);
            Vec::new()
        }
    }
}

/// Kick off all collection fetches. `on_loaded` runs once per collection
/// after it has been stored.
pub fn load_all(api: ApiClient, data: DataState, on_loaded: Rc<dyn Fn(Collection)>) {
    {
        let (api, data, on_loaded) = (api.clone(), data.clone(), on_loaded.clone());
        spawn_local(async move {
            let records = or_empty(Collection::Monasteries, api.fetch_monasteries().await);
            data.replace_monasteries(records);
            on_loaded(Collection::Monasteries);
        });
    }
    {
        let (api, data, on_loaded) = (api.clone(), data.clone(), on_loaded.clone());
        spawn_local(async move {
            let records = or_empty(Collection::Archives, api.fetch_archives().await);
            data.replace_archives(records);
            on_loaded(Collection::Archives);
        });
    }
    {
        let (api, data, on_loaded) = (api.clone(), data.clone(), on_loaded.clone());
        spawn_local(async move {
            let records = or_empty(Collection::Services, api.fetch_services().await);
            data.replace_services(records);
            on_loaded(Collection::Services);
        });
    }
    spawn_local(async move {
        let records = or_empty(Collection::Events, api.fetch_events().await);
        data.replace_events(records);
        on_loaded(Collection::Events);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::MarkerCategory;
    use crate::models::{PointOfInterest, SiteRecord};

    fn site(id: i64) -> SiteRecord {
        SiteRecord {
            id,
            name: format!("Site {id}"),
            coordinates: "27.33,88.61".to_string(),
            long_description: String::new(),
            short_description: String::new(),
            description: String::new(),
            map_url: String::new(),
        }
    }

    #[test]
    fn failed_poi_fetch_leaves_other_markers_intact() {
        let data = DataState::new();
        let failed: Result<Vec<PointOfInterest>, AppError> =
            Err(AppError::fetch("/data/monastery.json", "HTTP 404: Not Found"));

        data.replace_monasteries(or_empty(Collection::Monasteries, failed));
        data.replace_archives(or_empty(Collection::Archives, Ok(vec![site(1)])));
        data.replace_services(or_empty(Collection::Services, Ok(vec![site(2), site(3)])));

        let layer = data.marker_layer();
        assert_eq!(layer.count(MarkerCategory::Standard), 0);
        assert_eq!(layer.count(MarkerCategory::Archive), 1);
        assert_eq!(layer.count(MarkerCategory::Service), 2);
    }
}
