// ============================================================================
// STATE MODULE - Rc<RefCell> store, no globals
// ============================================================================

pub mod app_state;
pub mod data_state;
pub mod guide_state;
pub mod mount_guard;
pub mod planner_state;
pub mod ui_state;

pub use app_state::*;
pub use data_state::DataState;
pub use guide_state::{pick_suggestion, GuideAuthor, GuideMessage, GuideState};
pub use mount_guard::MountGuard;
pub use planner_state::{PlanStatus, PlannerState};
pub use ui_state::*;
