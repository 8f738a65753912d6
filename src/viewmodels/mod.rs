pub mod calendar_viewmodel;
pub mod catalog_viewmodel;
pub mod detail_viewmodel;
pub mod faq_viewmodel;
pub mod guide_viewmodel;
pub mod map_viewmodel;
pub mod planner_viewmodel;
pub mod playlist_viewmodel;

pub use detail_viewmodel::DetailViewModel;
pub use guide_viewmodel::GuideViewModel;
pub use map_viewmodel::MapViewModel;
pub use planner_viewmodel::PlannerViewModel;
pub use playlist_viewmodel::PlaylistViewModel;

use std::rc::Rc;

use crate::services::PwaInstallService;

/// Everything a view needs to dispatch user actions.
#[derive(Clone)]
pub struct ViewModels {
    pub map: MapViewModel,
    pub detail: DetailViewModel,
    pub planner: PlannerViewModel,
    pub guide: GuideViewModel,
    pub playlist: PlaylistViewModel,
    pub install: Rc<PwaInstallService>,
}
