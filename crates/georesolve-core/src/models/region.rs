use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GeocodingError, Result};

/// Administrative tier a query or a result is resolved at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKind {
    Country,
    State,
    County,
    City,
}

impl LevelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelKind::Country => "country",
            LevelKind::State => "state",
            LevelKind::County => "county",
            LevelKind::City => "city",
        }
    }
}

impl fmt::Display for LevelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelKind {
    type Err = GeocodingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "country" => Ok(LevelKind::Country),
            "state" => Ok(LevelKind::State),
            "county" => Ok(LevelKind::County),
            "city" => Ok(LevelKind::City),
            _ => Err(GeocodingError::Config {
                key: "level".to_string(),
                reason: format!("Invalid level kind: {}. Use country, state, county or city", s),
            }),
        }
    }
}

/// Reference to a region used as a parent or a scope.
///
/// - `Name` is a single name that is not geocoded yet.
/// - `Ids` is a set of already geocoded objects; the only kind that may hold
///   more than one entity.
/// - `Place` is a single geocoded object that also remembers the name it was
///   requested by and its level. It goes on the wire as an id set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapRegion {
    Name(String),
    Ids(Vec<String>),
    Place {
        id: String,
        request: Option<String>,
        level: LevelKind,
    },
}

impl MapRegion {
    pub fn with_name(name: impl Into<String>) -> Self {
        MapRegion::Name(name.into())
    }

    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MapRegion::Ids(ids.into_iter().map(Into::into).collect())
    }

    pub fn place(id: impl Into<String>, request: Option<String>, level: LevelKind) -> Self {
        MapRegion::Place { id: id.into(), request, level }
    }

    /// Values sent on the wire: the name, or the ids
    pub fn values(&self) -> Vec<&str> {
        match self {
            MapRegion::Name(name) => vec![name.as_str()],
            MapRegion::Ids(ids) => ids.iter().map(String::as_str).collect(),
            MapRegion::Place { id, .. } => vec![id.as_str()],
        }
    }

    /// Number of entities this region refers to
    pub fn len(&self) -> usize {
        match self {
            MapRegion::Ids(ids) => ids.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the region is sent as an id set rather than a name
    pub fn is_ids(&self) -> bool {
        !matches!(self, MapRegion::Name(_))
    }

    /// Name shown in parent columns. Id sets have no name.
    pub fn name_or_none(&self) -> Option<&str> {
        match self {
            MapRegion::Name(name) => Some(name),
            MapRegion::Place { request, .. } => request.as_deref(),
            MapRegion::Ids(_) => None,
        }
    }

    /// Fails unless the region refers to exactly one entity
    pub fn ensure_single(self, argument: &'static str) -> Result<Self> {
        let count = self.len();
        if count != 1 {
            return Err(GeocodingError::ExpectedSingleEntry { argument, count });
        }
        Ok(self)
    }
}

impl fmt::Display for MapRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapRegion::Name(name) => f.write_str(name),
            MapRegion::Ids(ids) => f.write_str(&ids.join(",")),
            MapRegion::Place { id, request, .. } => f.write_str(request.as_deref().unwrap_or(id)),
        }
    }
}

impl From<&str> for MapRegion {
    fn from(name: &str) -> Self {
        MapRegion::with_name(name)
    }
}

impl From<String> for MapRegion {
    fn from(name: String) -> Self {
        MapRegion::Name(name)
    }
}

impl From<&MapRegion> for MapRegion {
    fn from(region: &MapRegion) -> Self {
        region.clone()
    }
}
