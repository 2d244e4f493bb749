use serde::{Deserialize, Serialize};

use crate::error::LocatorError;
use crate::geo::Coordinate;
use crate::place::Place;
use crate::proximity::{compute_distances, filter_and_sort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, specta::Type)]
/// Search radius presets offered by the radius menu.
pub enum SearchRadius {
    Km1,
    Km5,
    Km10,
    Km25,
}

impl SearchRadius {
    pub const ALL: [Self; 4] = [
        SearchRadius::Km1,
        SearchRadius::Km5,
        SearchRadius::Km10,
        SearchRadius::Km25,
    ];

    pub fn meters(&self) -> f64 {
        match self {
            SearchRadius::Km1 => 1_000.0,
            SearchRadius::Km5 => 5_000.0,
            SearchRadius::Km10 => 10_000.0,
            SearchRadius::Km25 => 25_000.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchRadius::Km1 => "1 km",
            SearchRadius::Km5 => "5 km",
            SearchRadius::Km10 => "10 km",
            SearchRadius::Km25 => "25 km",
        }
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        SearchRadius::Km5
    }
}

/// A snapshot of what the user is searching for: where they are and how far
/// out to look. Never mutated in place; every change builds a replacement
/// with a bumped `seq`, so a recompute always runs from a consistent
/// snapshot and stale results can be recognized by their generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, specta::Type)]
pub struct SearchContext {
    pub reference: Coordinate,
    pub radius: SearchRadius,
    /// Monotonic generation, bumped on every change. The newest applied
    /// generation wins at the render boundary.
    pub seq: u64,
}

impl SearchContext {
    pub fn new(reference: Coordinate, radius: SearchRadius) -> Self {
        Self {
            reference,
            radius,
            seq: 0,
        }
    }

    pub fn with_reference(self, reference: Coordinate) -> Self {
        Self {
            reference,
            seq: self.seq + 1,
            ..self
        }
    }

    pub fn with_radius(self, radius: SearchRadius) -> Self {
        Self {
            radius,
            seq: self.seq + 1,
            ..self
        }
    }

    /// Full query against a catalog: measure, filter to the radius, sort
    /// nearest first.
    pub fn results(&self, catalog: &[Place]) -> Result<Vec<Place>, LocatorError> {
        filter_and_sort(
            compute_distances(self.reference, catalog),
            self.radius.meters(),
        )
    }
}
