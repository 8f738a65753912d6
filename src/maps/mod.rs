// Map widget: pure marker derivation and lifecycle on top of a backend seam

pub mod border;
pub mod controller;
pub mod markers;
pub mod traits;
pub mod web;

pub use controller::{InitOutcome, MapController, RebuildOutcome, MAX_INIT_ATTEMPTS};
pub use markers::{build_marker_layer, MarkerCategory, MarkerLayer, MarkerSpec};
pub use traits::{MapBackend, MapError, MapOptions, SelectionCallback, SelectionTarget};
pub use web::LeafletBackend;
