use serde::{Deserialize, Serialize};

use super::geometry::{GeoPoint, GeoRect};
use crate::error::{GeocodingError, Result};

/// Service-side strategy for names that match zero or several objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoringStrategy {
    /// Drop names that are missing or ambiguous
    SkipAll,
    /// Drop names with no match
    SkipMissing,
    /// Drop names with several matches
    SkipAmbiguous,
    /// Keep every namesake
    TakeNamesakes,
}

/// How to disambiguate namesakes. At most one strategy is active.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AmbiguityResolver {
    /// Ambiguity is reported as an error
    #[default]
    Empty,
    Ignoring(IgnoringStrategy),
    /// Take the namesake nearest to a point
    ClosestTo(GeoPoint),
    /// Take the namesake whose centroid falls into a box
    Within(GeoRect),
}

impl AmbiguityResolver {
    /// Build a resolver from optional parts; setting more than one is invalid
    pub fn new(
        ignoring_strategy: Option<IgnoringStrategy>,
        closest_coord: Option<GeoPoint>,
        within: Option<GeoRect>,
    ) -> Result<Self> {
        match (ignoring_strategy, closest_coord, within) {
            (None, None, None) => Ok(AmbiguityResolver::Empty),
            (Some(strategy), None, None) => Ok(AmbiguityResolver::Ignoring(strategy)),
            (None, Some(point), None) => Ok(AmbiguityResolver::ClosestTo(point)),
            (None, None, Some(rect)) => Ok(AmbiguityResolver::Within(rect)),
            _ => Err(GeocodingError::ConflictingResolver),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AmbiguityResolver::Empty)
    }

    pub fn ignoring_strategy(&self) -> Option<IgnoringStrategy> {
        match self {
            AmbiguityResolver::Ignoring(strategy) => Some(*strategy),
            _ => None,
        }
    }

    pub fn closest_coord(&self) -> Option<GeoPoint> {
        match self {
            AmbiguityResolver::ClosestTo(point) => Some(*point),
            _ => None,
        }
    }

    pub fn box_(&self) -> Option<GeoRect> {
        match self {
            AmbiguityResolver::Within(rect) => Some(*rect),
            _ => None,
        }
    }

    /// This resolver, or `fallback` when this one is empty
    pub fn or(self, fallback: AmbiguityResolver) -> AmbiguityResolver {
        if self.is_empty() {
            fallback
        } else {
            self
        }
    }
}
