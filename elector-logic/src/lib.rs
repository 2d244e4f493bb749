mod content;
mod error;
mod geo;
mod locator;
mod news;
mod place;
mod proximity;
mod search;

pub use content::{
    DemographicStat, InfoCard, NotificationPrefs, OnboardingPage, ResourceLink, TownHallEvent,
    VoterStory, onboarding_pages, town_hall_events, voice_matters_stories, voting_demographics,
    voting_info_cards, voting_resources,
};
pub use error::LocatorError;
pub use geo::{Coordinate, EARTH_RADIUS_M, distance_m};
pub use locator::{
    DEFAULT_REFERENCE, LocationService, LocatorSession, LocatorUiState, MIN_SPAN_DEG,
    StateUpdateSender,
};
pub use news::{Article, bundled_articles};
pub use place::{Place, PlaceCategory, format_distance, tysons_catalog};
pub use proximity::{DEFAULT_PADDING, Region, compute_distances, filter_and_sort, fit_region};
pub use search::{SearchContext, SearchRadius};

pub mod prelude {
    use anyhow::Error as AnyhowError;
    use std::result::Result as StdResult;
    pub type Result<T = (), E = AnyhowError> = StdResult<T, E>;
    pub use anyhow::Context;
}

use chrono::{DateTime, Utc};

/// Convenience alias for UTC DT
pub type UtcDT = DateTime<Utc>;
