pub mod api_client;
pub mod asset_probe;
pub mod data_loader;
pub mod geolocation;
pub mod pwa_install;
pub mod speech;

pub use api_client::ApiClient;
pub use asset_probe::{find_interior_image, probe_interiors, ProbeHandle};
pub use data_loader::{load_all, Collection};
pub use geolocation::{current_position, LocateToken};
pub use pwa_install::{InstallOutcome, InstallState, PwaInstallService};
pub use speech::{SpeechService, SpeechStatus};
