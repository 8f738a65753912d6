use std::collections::HashSet;

use crate::models::{Coordinates, Place, PointOfInterest, SiteRecord};
use crate::utils::html::escape_html;

use super::traits::SelectionTarget;

/// Visual category of a marker. Derived from data, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerCategory {
    Standard,
    Panoramic,
    Interior,
    Archive,
    Service,
}

impl MarkerCategory {
    pub fn css_class(&self) -> &'static str {
        match self {
            MarkerCategory::Standard => "monastery-marker",
            MarkerCategory::Panoramic => "view360-marker",
            MarkerCategory::Interior => "interior-marker",
            MarkerCategory::Archive => "archive-marker",
            MarkerCategory::Service => "service-marker",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            MarkerCategory::Standard => "#ea580c",
            MarkerCategory::Panoramic => "#eab308",
            MarkerCategory::Interior => "#000000",
            MarkerCategory::Archive => "#2563eb",
            MarkerCategory::Service => "#16a34a",
        }
    }

    pub fn legend_label(&self) -> &'static str {
        match self {
            MarkerCategory::Standard => "Monastery",
            MarkerCategory::Panoramic => "360° View",
            MarkerCategory::Interior => "Interior",
            MarkerCategory::Archive => "Archive",
            MarkerCategory::Service => "Services",
        }
    }

    pub const ALL: [MarkerCategory; 5] = [
        MarkerCategory::Standard,
        MarkerCategory::Panoramic,
        MarkerCategory::Interior,
        MarkerCategory::Archive,
        MarkerCategory::Service,
    ];

    /// Inner HTML of the divIcon.
    pub fn icon_html(&self) -> String {
        format!(
            r#"<div class="marker-dot" style="background:{};width:16px;height:16px;border-radius:50%;border:2px solid #fff;box-shadow:0 1px 4px rgba(0,0,0,.4)"></div>"#,
            self.color()
        )
    }
}

/// Panoramic wins over interior; interior needs a probe hit.
pub fn classify_poi(poi: &PointOfInterest, interior_ids: &HashSet<i64>) -> MarkerCategory {
    if poi.has_embed() {
        MarkerCategory::Panoramic
    } else if interior_ids.contains(&poi.id) {
        MarkerCategory::Interior
    } else {
        MarkerCategory::Standard
    }
}

/// Drop a trailing district suffix such as " East Sikkim" or " Sikkim".
pub fn clean_display_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut words: Vec<&str> = trimmed.split_whitespace().collect();

    if words.len() > 1 && words.last().map_or(false, |w| *w == "Sikkim") {
        words.pop();
        if words.len() > 1
            && words
                .last()
                .map_or(false, |w| matches!(*w, "North" | "South" | "East" | "West"))
        {
            words.pop();
        }
        return words.join(" ");
    }
    trimmed.to_string()
}

/// One marker ready for the widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub target: SelectionTarget,
    pub category: MarkerCategory,
    pub position: Coordinates,
    pub title: String,
    pub popup_html: String,
}

/// A fully derived marker set tagged with the data revision it was built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarkerLayer {
    pub revision: u64,
    pub markers: Vec<MarkerSpec>,
    /// Records left out because their coordinates did not parse.
    pub skipped: usize,
}

impl MarkerLayer {
    pub fn count(&self, category: MarkerCategory) -> usize {
        self.markers.iter().filter(|m| m.category == category).count()
    }
}

fn popup_html(title: &str, text: &str, badge: &str) -> String {
    format!(
        r#"<div class="map-popup"><h3>{}</h3><p>{}</p>{}</div>"#,
        escape_html(title),
        escape_html(text),
        badge
    )
}

pub fn build_marker_layer(
    revision: u64,
    pois: &[PointOfInterest],
    archives: &[SiteRecord],
    services: &[SiteRecord],
    interior_ids: &HashSet<i64>,
) -> MarkerLayer {
    let mut layer = MarkerLayer {
        revision,
        ..Default::default()
    };

    for poi in pois {
        let Some(position) = poi.coordinates() else {
            layer.skipped += 1;
            continue;
        };
        let category = classify_poi(poi, interior_ids);
        let title = clean_display_name(&poi.name);
        let badge = if category == MarkerCategory::Panoramic {
            r#"<span class="badge-360">(360° view)</span>"#
        } else {
            ""
        };
        layer.markers.push(MarkerSpec {
            target: SelectionTarget::Monastery(poi.id),
            category,
            position,
            popup_html: popup_html(&title, &poi.short_description, badge),
            title,
        });
    }

    let sites = archives
        .iter()
        .map(|s| (s, MarkerCategory::Archive, SelectionTarget::Archive(s.id)))
        .chain(
            services
                .iter()
                .map(|s| (s, MarkerCategory::Service, SelectionTarget::Service(s.id))),
        );

    for (site, category, target) in sites {
        let Some(position) = site.coordinates() else {
            layer.skipped += 1;
            continue;
        };
        let badge = format!(r#"<span class="badge-kind">{}</span>"#, category.legend_label());
        layer.markers.push(MarkerSpec {
            target,
            category,
            position,
            title: site.name.clone(),
            popup_html: popup_html(&site.name, &site.long_description, &badge),
        });
    }

    layer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poi(id: i64, coords: &str, embed: &str) -> PointOfInterest {
        PointOfInterest {
            id,
            name: format!("Monastery {id} South Sikkim"),
            coordinates: coords.to_string(),
            map_url: String::new(),
            embed_html: embed.to_string(),
            short_description: "<script>alert(1)</script>".to_string(),
            long_description: String::new(),
            booking: None,
        }
    }

    fn site(id: i64, coords: &str) -> SiteRecord {
        SiteRecord {
            id,
            name: format!("Site {id}"),
            coordinates: coords.to_string(),
            long_description: "desc".to_string(),
            short_description: String::new(),
            description: String::new(),
            map_url: String::new(),
        }
    }

    #[test]
    fn iframe_embed_is_panoramic() {
        let p = poi(9, "27.313,88.605", r#"<iframe src="https://example.org/pano">"#);
        assert_eq!(classify_poi(&p, &HashSet::new()), MarkerCategory::Panoramic);
        // even when an interior asset exists
        assert_eq!(classify_poi(&p, &HashSet::from([9])), MarkerCategory::Panoramic);
    }

    #[test]
    fn probe_hit_is_interior_otherwise_standard() {
        let p = poi(42, "27.30,88.40", "");
        assert_eq!(classify_poi(&p, &HashSet::from([42])), MarkerCategory::Interior);
        assert_eq!(classify_poi(&p, &HashSet::new()), MarkerCategory::Standard);
    }

    #[test]
    fn cleans_district_suffixes() {
        assert_eq!(clean_display_name("Rumtek Monastery East Sikkim"), "Rumtek Monastery");
        assert_eq!(clean_display_name("Enchey Monastery  Sikkim "), "Enchey Monastery");
        assert_eq!(clean_display_name("Sikkim"), "Sikkim");
        assert_eq!(clean_display_name("North Sikkim"), "North");
        assert_eq!(clean_display_name("Dubdi Monastery"), "Dubdi Monastery");
    }

    #[test]
    fn layer_skips_malformed_and_escapes_popups() {
        let pois = vec![poi(1, "27.3,88.4", ""), poi(2, "oops", "")];
        let archives = vec![site(10, "27.33,88.61")];
        let services = vec![site(20, ""), site(21, "27.2,88.3")];
        let layer = build_marker_layer(3, &pois, &archives, &services, &HashSet::new());

        assert_eq!(layer.revision, 3);
        assert_eq!(layer.markers.len(), 3);
        assert_eq!(layer.skipped, 2);
        assert_eq!(layer.count(MarkerCategory::Archive), 1);
        assert_eq!(layer.count(MarkerCategory::Service), 1);
        assert_eq!(layer.markers[0].title, "Monastery 1");
        assert!(layer.markers[0].popup_html.contains("&lt;script&gt;"));
        assert!(!layer.markers[0].popup_html.contains("<script>"));
    }

    #[test]
    fn archive_categories_ignore_embed_content() {
        let mut archive = site(10, "27.33,88.61");
        archive.long_description = "<iframe>".to_string();
        let layer = build_marker_layer(1, &[], &[archive], &[], &HashSet::new());
        assert_eq!(layer.markers[0].category, MarkerCategory::Archive);
        assert_eq!(layer.markers[0].target, SelectionTarget::Archive(10));
    }

    #[test]
    fn building_twice_is_identical() {
        let pois = vec![poi(1, "27.3,88.4", "<iframe>")];
        let a = build_marker_layer(5, &pois, &[], &[], &HashSet::new());
        let b = build_marker_layer(5, &pois, &[], &[], &HashSet::new());
        assert_eq!(a, b);
    }
}
