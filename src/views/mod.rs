pub mod app;
pub mod calendar;
pub mod catalog;
pub mod detail;
pub mod faq;
pub mod guide;
pub mod header;
pub mod info;
pub mod landing;
pub mod map_page;
pub mod nearby;
pub mod planner;
pub mod playlist;

pub use app::render_app;
pub use calendar::{render_calendar, CALENDAR_ID};
pub use catalog::{
    render_catalog, render_catalog_list, render_catalog_tabs, CATALOG_LIST_ID, CATALOG_TABS_ID,
};
pub use detail::{render_detail, DETAIL_ID};
pub use faq::{render_faq, render_faq_body, FAQ_ID};
pub use guide::{render_guide, GUIDE_ID};
pub use header::{render_header, HEADER_ID};
pub use info::render_info;
pub use landing::render_landing;
pub use map_page::render_map_page;
pub use nearby::{render_nearby, NEARBY_ID};
pub use planner::{render_planner, PLANNER_ID};
pub use playlist::{render_playlist, sync_progress, PLAYLIST_ID};
