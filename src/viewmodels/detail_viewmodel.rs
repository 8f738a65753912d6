// ============================================================================
// DETAIL VIEWMODEL - detail panel content, interior lookup and audio guide
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::maps::SelectionTarget;
use crate::models::{interior_embed, region_for};
use crate::services::{find_interior_image, ProbeHandle, SpeechService, SpeechStatus};
use crate::state::{AppState, DataState, DetailMode, IncrementalUpdate, UpdateType};
use crate::utils::html::to_responsive_embed;

/// Element whose (possibly translated) text the audio guide reads.
pub const DESCRIPTION_ELEMENT_ID: &str = "detail-description";

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub target: SelectionTarget,
    pub kind_label: &'static str,
    pub title: String,
    pub region: &'static str,
    pub description: String,
    pub speech_text: String,
    pub image_url: Option<String>,
    /// Tried when `image_url` fails to load
    pub fallback_image_url: Option<String>,
    pub panorama_html: Option<String>,
    pub interior_html: Option<String>,
    pub map_url: Option<String>,
    pub booking_url: Option<String>,
}

impl DetailView {
    /// Interior is offered for a known embed, a probed image or a probe hit
    /// already recorded on the map.
    pub fn modes(&self, interior_image: Option<&str>, interior_known: bool) -> Vec<DetailMode> {
        let mut modes = Vec::new();
        if self.image_url.is_some() {
            modes.push(DetailMode::Image);
        }
        if self.panorama_html.is_some() {
            modes.push(DetailMode::Panorama);
        }
        if self.interior_html.is_some() || interior_image.is_some() || interior_known {
            modes.push(DetailMode::Interior);
        }
        modes
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn first_text(candidates: &[&str]) -> String {
    candidates
        .iter()
        .find_map(|s| non_blank(s))
        .unwrap_or_default()
}

pub fn detail_for(data: &DataState, target: SelectionTarget) -> Option<DetailView> {
    match target {
        SelectionTarget::Monastery(id) => {
            let poi = data.monastery(id)?;
            let description =
                first_text(&[poi.long_description.as_str(), poi.short_description.as_str()]);
            Some(DetailView {
                target,
                kind_label: "Monastery",
                region: region_for(&poi.coordinates),
                speech_text: description.clone(),
                description,
                image_url: Some(format!("/data/monastery/{}.png", id)),
                fallback_image_url: Some(format!("/data/monastery/{}.jpg", id)),
                panorama_html: poi.has_embed().then(|| to_responsive_embed(&poi.embed_html)),
                interior_html: interior_embed(id).map(to_responsive_embed),
                map_url: non_blank(&poi.map_url),
                booking_url: poi.booking.as_deref().and_then(non_blank),
                title: poi.name,
            })
        }
        SelectionTarget::Archive(id) => {
            let archive = data.archive(id)?;
            let description = first_text(&[
                archive.long_description.as_str(),
                archive.description.as_str(),
                archive.short_description.as_str(),
            ]);
            Some(DetailView {
                target,
                kind_label: "Archive",
                region: region_for(&archive.coordinates),
                speech_text: description.clone(),
                description,
                image_url: Some(format!("/data/archive/{}.png", id)),
                fallback_image_url: None,
                panorama_html: None,
                interior_html: None,
                map_url: non_blank(&archive.map_url),
                booking_url: None,
                title: archive.name,
            })
        }
        SelectionTarget::Service(id) => {
            let service = data.service(id)?;
            let description = first_text(&[
                service.long_description.as_str(),
                service.short_description.as_str(),
                service.description.as_str(),
            ]);
            Some(DetailView {
                target,
                kind_label: "Service",
                region: region_for(&service.coordinates),
                speech_text: description.clone(),
                description,
                image_url: None,
                fallback_image_url: None,
                panorama_html: None,
                interior_html: None,
                map_url: non_blank(&service.map_url),
                booking_url: None,
                title: service.name,
            })
        }
    }
}

/// Text currently shown in the description element; the translate widget
/// rewrites it in place, so this is what the reader actually sees.
fn rendered_description() -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(DESCRIPTION_ELEMENT_ID)?
        .text_content()
        .and_then(|t| non_blank(&t))
}

#[derive(Clone)]
pub struct DetailViewModel {
    state: AppState,
    probe: Rc<RefCell<Option<ProbeHandle>>>,
    speech: Rc<RefCell<SpeechService>>,
}

impl DetailViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            probe: Rc::new(RefCell::new(None)),
            speech: Rc::new(RefCell::new(SpeechService::new())),
        }
    }

    /// Open the panel for `target`, replacing whatever was open. Marker
    /// clicks, catalog rows and nearby rows all come through here so the
    /// selected-row highlight follows the panel.
    pub fn open(&self, target: SelectionTarget) {
        self.release();
        self.state.select(target);
        if let SelectionTarget::Monastery(id) = target {
            if interior_embed(id).is_none() {
                self.lookup_interior_image(id);
            }
        }
        refresh_selection();
    }

    /// Back action.
    pub fn close(&self) {
        self.release();
        self.state.clear_selection();
        refresh_selection();
    }

    /// Stop speech and cancel the interior lookup.
    pub fn release(&self) {
        if let Some(handle) = self.probe.borrow_mut().take() {
            handle.abort();
        }
        self.speech.borrow_mut().stop();
    }

    fn lookup_interior_image(&self, id: i64) {
        let handle = ProbeHandle::new();
        let signal = handle.signal();
        *self.probe.borrow_mut() = Some(handle);

        let state = self.state.clone();
        spawn_local(async move {
            let found = find_interior_image(id, signal.as_ref()).await;
            if signal.as_ref().map_or(false, |s| s.aborted()) {
                return;
            }
            if state.selection() != Some(SelectionTarget::Monastery(id)) {
                return;
            }
            if let Some(url) = found {
                log::info!("🔎 [PROBE] Interior image for #{}: {}", id, url);
                *state.detail_interior_image.borrow_mut() = Some(url);
                crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Detail));
            }
        });
    }

    pub fn set_mode(&self, mode: DetailMode) {
        *self.state.detail_mode.borrow_mut() = mode;
    }

    pub fn speech_supported(&self) -> bool {
        self.speech.borrow().is_supported()
    }

    pub fn speech_status(&self) -> SpeechStatus {
        self.speech.borrow().status()
    }

    pub fn play(&self, fallback_text: &str) {
        let text = rendered_description().unwrap_or_else(|| fallback_text.to_string());
        let lang = self.state.language().speech_locale();
        self.speech.borrow_mut().play(&text, lang, || {
            crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Detail));
        });
    }

    pub fn pause(&self) {
        self.speech.borrow().pause();
    }

    pub fn resume(&self) {
        self.speech.borrow().resume();
    }

    pub fn stop(&self) {
        self.speech.borrow_mut().stop();
    }
}

/// Also repaints the catalog highlight, see `IncrementalUpdate::regions`.
fn refresh_selection() {
    crate::rerender_app_with_type(UpdateType::Incremental(IncrementalUpdate::Detail));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PointOfInterest, SiteRecord};

    fn poi(id: i64, embed: &str) -> PointOfInterest {
        PointOfInterest {
            id,
            name: "Rumtek Monastery".to_string(),
            coordinates: "27.313,88.605".to_string(),
            map_url: " ".to_string(),
            embed_html: embed.to_string(),
            short_description: "Short".to_string(),
            long_description: String::new(),
            booking: Some("https://book.example/rumtek".to_string()),
        }
    }

    fn data() -> DataState {
        let data = DataState::new();
        data.replace_monasteries(vec![
            poi(9, r#"<iframe width="600" height="450" src="x"></iframe>"#),
            poi(42, ""),
        ]);
        data.replace_archives(vec![SiteRecord {
            id: 3,
            name: "Namgyal Institute".to_string(),
            coordinates: "".to_string(),
            long_description: "Long archive text".to_string(),
            short_description: String::new(),
            description: String::new(),
            map_url: "https://maps.example/n".to_string(),
        }]);
        data
    }

    #[test]
    fn monastery_detail_has_all_modes_for_known_interior() {
        let view = detail_for(&data(), SelectionTarget::Monastery(9)).unwrap();
        assert_eq!(view.region, "East Sikkim");
        assert_eq!(view.description, "Short");
        assert_eq!(view.map_url, None);
        assert_eq!(view.booking_url.as_deref(), Some("https://book.example/rumtek"));
        assert!(view.panorama_html.as_deref().unwrap().contains(r#"width="100%""#));
        assert_eq!(
            view.modes(None, false),
            vec![DetailMode::Image, DetailMode::Panorama, DetailMode::Interior]
        );
    }

    #[test]
    fn interior_mode_needs_a_probe_hit() {
        let view = detail_for(&data(), SelectionTarget::Monastery(42)).unwrap();
        assert_eq!(view.modes(None, false), vec![DetailMode::Image]);
        assert_eq!(
            view.modes(Some("/data/monastery/42_x.jpg"), false),
            vec![DetailMode::Image, DetailMode::Interior]
        );
    }

    #[test]
    fn archive_detail_uses_archive_image_and_unknown_region() {
        let view = detail_for(&data(), SelectionTarget::Archive(3)).unwrap();
        assert_eq!(view.image_url.as_deref(), Some("/data/archive/3.png"));
        assert_eq!(view.region, "Location Unknown");
        assert_eq!(view.speech_text, "Long archive text");
    }

    #[test]
    fn missing_record_has_no_detail() {
        assert!(detail_for(&data(), SelectionTarget::Service(1)).is_none());
    }
}
