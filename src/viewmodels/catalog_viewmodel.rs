// ============================================================================
// CATALOG VIEWMODEL - side list rows for the active tab and search
// ============================================================================

use crate::maps::markers::classify_poi;
use crate::maps::{MarkerCategory, SelectionTarget};
use crate::models::{matches_query, Place};
use crate::state::{CatalogState, CatalogTab, DataState};

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub target: SelectionTarget,
    pub name: String,
    pub summary: String,
    pub category: MarkerCategory,
}

/// Rows for the selected tab whose text matches the search, in collection order.
pub fn catalog_entries(data: &DataState, catalog: &CatalogState) -> Vec<CatalogEntry> {
    let query = catalog.search.as_str();
    match catalog.tab {
        CatalogTab::Monastery => {
            let interior_ids = data.interior_ids.borrow();
            data.monasteries
                .borrow()
                .iter()
                .filter(|p| matches_query(*p as &dyn Place, query))
                .map(|p| CatalogEntry {
                    target: SelectionTarget::Monastery(p.id),
                    name: p.name.clone(),
                    summary: p.short_description.clone(),
                    category: classify_poi(p, &interior_ids),
                })
                .collect()
        }
        CatalogTab::Archive => data
            .archives
            .borrow()
            .iter()
            .filter(|a| matches_query(*a as &dyn Place, query))
            .map(|a| CatalogEntry {
                target: SelectionTarget::Archive(a.id),
                name: a.name.clone(),
                summary: a.summary().to_string(),
                category: MarkerCategory::Archive,
            })
            .collect(),
        CatalogTab::Services => data
            .services
            .borrow()
            .iter()
            .filter(|s| matches_query(*s as &dyn Place, query))
            .map(|s| CatalogEntry {
                target: SelectionTarget::Service(s.id),
                name: s.name.clone(),
                summary: s.summary().to_string(),
                category: MarkerCategory::Service,
            })
            .collect(),
    }
}

/// "3 monasteries" style count line.
pub fn count_label(tab: CatalogTab, count: usize) -> String {
    let (one, many) = match tab {
        CatalogTab::Monastery => ("monastery", "monasteries"),
        CatalogTab::Archive => ("archive", "archives"),
        CatalogTab::Services => ("service", "services"),
    };
    format!("{} {}", count, if count == 1 { one } else { many })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PointOfInterest, SiteRecord};
    use std::collections::HashSet;

    fn poi(id: i64, name: &str, short: &str, embed: &str) -> PointOfInterest {
        PointOfInterest {
            id,
            name: name.to_string(),
            coordinates: "27.3,88.6".to_string(),
            map_url: String::new(),
            embed_html: embed.to_string(),
            short_description: short.to_string(),
            long_description: String::new(),
            booking: None,
        }
    }

    fn site(id: i64, name: &str, desc: &str) -> SiteRecord {
        SiteRecord {
            id,
            name: name.to_string(),
            coordinates: "27.3,88.6".to_string(),
            long_description: String::new(),
            short_description: String::new(),
            description: desc.to_string(),
            map_url: String::new(),
        }
    }

    fn data() -> DataState {
        let data = DataState::new();
        data.replace_monasteries(vec![
            poi(1, "Rumtek", "Seat of the Karmapa", "<iframe src=x>"),
            poi(2, "Enchey", "Above Gangtok", ""),
            poi(3, "Pemayangtse", "Nyingma monastery", ""),
        ]);
        data.replace_archives(vec![site(10, "Namgyal Institute", "Tibetology manuscripts")]);
        data.replace_services(vec![site(20, "Gangtok Taxi Stand", "Shared jeeps")]);
        data
    }

    #[test]
    fn search_matches_descriptions_case_insensitively() {
        let data = data();
        let catalog = CatalogState {
            tab: CatalogTab::Monastery,
            search: "KARMAPA".to_string(),
        };
        let rows = catalog_entries(&data, &catalog);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target, SelectionTarget::Monastery(1));
        assert_eq!(rows[0].category, MarkerCategory::Panoramic);
    }

    #[test]
    fn tabs_select_their_collection() {
        let data = data();
        let archives = catalog_entries(
            &data,
            &CatalogState {
                tab: CatalogTab::Archive,
                search: "manuscript".to_string(),
            },
        );
        assert_eq!(archives[0].target, SelectionTarget::Archive(10));
        assert_eq!(archives[0].summary, "Tibetology manuscripts");

        let services = catalog_entries(
            &data,
            &CatalogState {
                tab: CatalogTab::Services,
                search: String::new(),
            },
        );
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].category, MarkerCategory::Service);
    }

    #[test]
    fn probed_interiors_show_in_list() {
        let data = data();
        let started = data.poi_revision();
        assert!(data.set_interior_ids(HashSet::from([3]), started));
        let rows = catalog_entries(&data, &CatalogState::default());
        assert_eq!(rows[2].category, MarkerCategory::Interior);
        assert_eq!(rows[1].category, MarkerCategory::Standard);
    }

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(CatalogTab::Monastery, 1), "1 monastery");
        assert_eq!(count_label(CatalogTab::Services, 0), "0 services");
    }
}
