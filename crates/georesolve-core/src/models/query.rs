use serde::{Deserialize, Serialize};

use super::region::MapRegion;
use super::resolver::AmbiguityResolver;

/// A single named lookup inside a geocoding request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionQuery {
    /// Free-text name; `None` selects every object of the requested level
    pub request: Option<String>,

    /// Region that constrains candidates without being a strict parent
    pub scope: Option<MapRegion>,

    pub ambiguity_resolver: AmbiguityResolver,

    pub country: Option<MapRegion>,
    pub state: Option<MapRegion>,
    pub county: Option<MapRegion>,
}

impl RegionQuery {
    /// Query for a name with no parents, scope or resolver
    pub fn named(request: impl Into<String>) -> Self {
        Self { request: Some(request.into()), ..Default::default() }
    }

    /// Query without a name ("all objects of the level")
    pub fn select_all() -> Self {
        Self::default()
    }

    pub fn has_parents(&self) -> bool {
        self.country.is_some() || self.state.is_some() || self.county.is_some()
    }
}
