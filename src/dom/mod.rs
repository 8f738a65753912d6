// ============================================================================
// DOM MODULE - helpers for direct DOM manipulation
// ============================================================================

pub mod builder;
pub mod element;
pub mod events;

pub use builder::*;
pub use element::*;
pub use events::*;
