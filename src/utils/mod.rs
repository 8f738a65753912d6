// Shared helpers

pub mod html;
pub mod i18n;
pub mod leaflet_ffi;
pub mod storage;
pub mod translate_ffi;

pub use html::{escape_html, render_markdown, to_responsive_embed};
pub use i18n::Language;
