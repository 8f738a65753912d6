// ============================================================================
// APP STATE - explicit application store
// ============================================================================
// Handed to every view and viewmodel. Replaces window-level globals for
// translation and install-prompt state.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::geo::NearbyPlace;
use crate::maps::SelectionTarget;
use crate::models::AUDIO_TRACKS;
use crate::services::InstallState;
use crate::state::{
    CalendarCursor, CatalogState, DataState, FaqFilter, GuideState, PlannerState, PlaylistState,
};
use crate::utils::i18n::Language;
use crate::utils::storage::{load_from_storage, save_to_storage, LANGUAGE_KEY};

/// DOM update kind.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateType {
    /// Patch one region in place
    Incremental(IncrementalUpdate),
    /// Rebuild the whole tree (view switch). Tears the map down.
    FullRender,
}

#[derive(Clone, Debug, PartialEq)]
pub enum IncrementalUpdate {
    Catalog,
    Detail,
    NearbyPanel,
    Planner,
    Calendar,
    Faq,
    Guide,
    Playlist,
    /// Elapsed time and seek bar only
    PlaylistProgress,
    Header,
}

/// DOM region patched by an incremental update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Header,
    CatalogTabs,
    CatalogList,
    Detail,
    Nearby,
    Planner,
    Calendar,
    Faq,
    Guide,
    Playlist,
    /// Patched in place, never replaced
    Progress,
}

impl IncrementalUpdate {
    /// Regions to patch while `view` is showing. Empty when the update
    /// belongs to another page; that page rebuilds from state when shown.
    pub fn regions(&self, view: ActiveView) -> &'static [Region] {
        use ActiveView as V;
        match (self, view) {
            (IncrementalUpdate::Header, _) => &[Region::Header],
            (IncrementalUpdate::Catalog, V::Map) => &[Region::CatalogTabs, Region::CatalogList],
            // The open record is highlighted in the catalog list
            (IncrementalUpdate::Detail, V::Map) => &[Region::Detail, Region::CatalogList],
            (IncrementalUpdate::NearbyPanel, V::Map) => &[Region::Nearby],
            (IncrementalUpdate::Planner, V::Planner) => &[Region::Planner],
            (IncrementalUpdate::Calendar, V::Calendar) => &[Region::Calendar],
            (IncrementalUpdate::Faq, V::Faq) => &[Region::Faq],
            (IncrementalUpdate::Guide, V::Faq) => &[Region::Guide],
            (IncrementalUpdate::Playlist, V::Audio) => &[Region::Playlist],
            (IncrementalUpdate::PlaylistProgress, V::Audio) => &[Region::Progress],
            _ => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Landing,
    Map,
    Planner,
    Calendar,
    Faq,
    Audio,
    Info,
}

impl ActiveView {
    /// Tabs in the navigation bar. Landing is reached through the title and
    /// Info through its own header button.
    pub const NAV: [ActiveView; 5] = [
        ActiveView::Map,
        ActiveView::Planner,
        ActiveView::Calendar,
        ActiveView::Faq,
        ActiveView::Audio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActiveView::Landing => "Home",
            ActiveView::Info => "Information",
            ActiveView::Map => "Explore",
            ActiveView::Planner => "Trip Planner",
            ActiveView::Calendar => "Festivals",
            ActiveView::Faq => "Q&A",
            ActiveView::Audio => "Audio",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DetailMode {
    #[default]
    Image,
    Panorama,
    Interior,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum NearbyStatus {
    #[default]
    Hidden,
    Locating,
    Found(Vec<NearbyPlace>),
    Failed(String),
}

#[derive(Clone)]
pub struct AppState {
    pub data: DataState,

    pub view: Rc<RefCell<ActiveView>>,
    pub selection: Rc<RefCell<Option<SelectionTarget>>>,
    pub detail_mode: Rc<RefCell<DetailMode>>,
    /// Interior image found for the open detail panel
    pub detail_interior_image: Rc<RefCell<Option<String>>>,
    pub catalog: Rc<RefCell<CatalogState>>,
    pub nearby: Rc<RefCell<NearbyStatus>>,

    pub language: Rc<RefCell<Language>>,
    pub translate_visible: Rc<RefCell<bool>>,
    pub install: Rc<RefCell<InstallState>>,
    pub install_message: Rc<RefCell<Option<String>>>,

    pub faq: Rc<RefCell<FaqFilter>>,
    pub guide: Rc<RefCell<GuideState>>,
    pub planner: Rc<RefCell<PlannerState>>,
    pub calendar: Rc<RefCell<CalendarCursor>>,
    pub playlist: Rc<RefCell<PlaylistState>>,
}

impl AppState {
    pub fn new(today: NaiveDate) -> Self {
        let language = load_from_storage::<Language>(LANGUAGE_KEY).unwrap_or_default();
        Self::with_language(today, language)
    }

    /// Store without touching localStorage.
    pub fn with_language(today: NaiveDate, language: Language) -> Self {
        Self {
            data: DataState::new(),
            view: Rc::new(RefCell::new(ActiveView::default())),
            selection: Rc::new(RefCell::new(None)),
            detail_mode: Rc::new(RefCell::new(DetailMode::default())),
            detail_interior_image: Rc::new(RefCell::new(None)),
            catalog: Rc::new(RefCell::new(CatalogState::default())),
            nearby: Rc::new(RefCell::new(NearbyStatus::default())),
            language: Rc::new(RefCell::new(language)),
            translate_visible: Rc::new(RefCell::new(false)),
            install: Rc::new(RefCell::new(InstallState::default())),
            install_message: Rc::new(RefCell::new(None)),
            faq: Rc::new(RefCell::new(FaqFilter::default())),
            guide: Rc::new(RefCell::new(GuideState::default())),
            planner: Rc::new(RefCell::new(PlannerState::default())),
            calendar: Rc::new(RefCell::new(CalendarCursor::at(today))),
            playlist: Rc::new(RefCell::new(PlaylistState::new(AUDIO_TRACKS.len()))),
        }
    }

    pub fn active_view(&self) -> ActiveView {
        *self.view.borrow()
    }

    /// Switching views closes any open detail panel.
    pub fn set_view(&self, view: ActiveView) -> bool {
        if self.active_view() == view {
            return false;
        }
        *self.view.borrow_mut() = view;
        self.clear_selection();
        true
    }

    pub fn selection(&self) -> Option<SelectionTarget> {
        *self.selection.borrow()
    }

    pub fn select(&self, target: SelectionTarget) {
        *self.selection.borrow_mut() = Some(target);
        *self.detail_mode.borrow_mut() = DetailMode::Image;
        *self.detail_interior_image.borrow_mut() = None;
    }

    pub fn clear_selection(&self) {
        *self.selection.borrow_mut() = None;
        *self.detail_interior_image.borrow_mut() = None;
    }

    pub fn language(&self) -> Language {
        *self.language.borrow()
    }

    /// Returns `true` when the language actually changed.
    pub fn set_language(&self, language: Language) -> bool {
        if self.language() == language {
            return false;
        }
        *self.language.borrow_mut() = language;
        if let Err(e) = save_to_storage(LANGUAGE_KEY, &language) {
            log::warn!("⚠️ [I18N] {}", e);
        }
        true
    }

    pub fn toggle_translate(&self) {
        let visible = *self.translate_visible.borrow();
        *self.translate_visible.borrow_mut() = !visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::with_language(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), Language::English)
    }

    #[test]
    fn detail_update_refreshes_catalog_highlight() {
        let regions = IncrementalUpdate::Detail.regions(ActiveView::Map);
        assert!(regions.contains(&Region::Detail));
        assert!(regions.contains(&Region::CatalogList));
    }

    #[test]
    fn updates_for_hidden_pages_patch_nothing() {
        assert!(IncrementalUpdate::Detail.regions(ActiveView::Faq).is_empty());
        assert!(IncrementalUpdate::Guide.regions(ActiveView::Map).is_empty());
        assert!(IncrementalUpdate::PlaylistProgress.regions(ActiveView::Landing).is_empty());
        assert_eq!(IncrementalUpdate::Header.regions(ActiveView::Info), &[Region::Header]);
    }

    #[test]
    fn starts_on_landing_outside_the_tabs() {
        let app = state();
        assert_eq!(app.active_view(), ActiveView::Landing);
        assert!(!ActiveView::NAV.contains(&ActiveView::Landing));
        assert!(!ActiveView::NAV.contains(&ActiveView::Info));
        assert!(app.set_view(ActiveView::Map));
        assert!(app.set_view(ActiveView::Landing));
    }

    #[test]
    fn selection_opens_and_back_clears() {
        let app = state();
        app.select(SelectionTarget::Archive(4));
        assert_eq!(app.selection(), Some(SelectionTarget::Archive(4)));
        app.clear_selection();
        assert_eq!(app.selection(), None);
    }

    #[test]
    fn switching_view_closes_detail() {
        let app = state();
        app.select(SelectionTarget::Monastery(9));
        assert!(app.set_view(ActiveView::Calendar));
        assert_eq!(app.selection(), None);
        assert!(!app.set_view(ActiveView::Calendar));
    }

    #[test]
    fn new_selection_resets_detail_mode() {
        let app = state();
        app.select(SelectionTarget::Monastery(9));
        *app.detail_mode.borrow_mut() = DetailMode::Panorama;
        app.select(SelectionTarget::Monastery(10));
        assert_eq!(*app.detail_mode.borrow(), DetailMode::Image);
    }

    #[test]
    fn translate_toggle_flips() {
        let app = state();
        app.toggle_translate();
        assert!(*app.translate_visible.borrow());
        app.toggle_translate();
        assert!(!*app.translate_visible.borrow());
    }
}
