pub mod audio;
pub mod coordinates;
pub mod event;
pub mod faq;
pub mod guide;
pub mod interior;
pub mod place;
pub mod plan;

pub use audio::{AudioTrack, TrackKind, AUDIO_TRACKS};
pub use coordinates::{region_for, Coordinates, GeoBounds};
pub use event::FestivalEvent;
pub use faq::{FaqCategory, FaqItem, FAQ_ITEMS};
pub use guide::{Difficulty, TripSuggestion, QUICK_PROMPTS, TRIP_SUGGESTIONS};
pub use interior::interior_embed;
pub use place::{matches_query, Place, PointOfInterest, SiteRecord};
pub use plan::{PlanField, PlanRequest, PlanResponse};
