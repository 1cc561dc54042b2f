//! Request values sent to the geocoding service.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::geometry::GeoPoint;
use super::query::RegionQuery;
use super::region::{LevelKind, MapRegion};
use crate::error::{GeocodingError, Result};

pub const MISSING_LEVEL_OR_REQUEST: &str = "Missing required argument: level or request.";
pub const MISSING_LEVEL_AND_SCOPE_OR_REQUEST: &str =
    "Missing required argument. You must enter level and scope or request.";

/// Default number of namesake examples the service reports per ambiguous name
pub const NAMESAKE_MAX_COUNT: usize = 10;

/// Kind of data attached to each returned feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayloadKind {
    #[serde(rename = "highlights")]
    Highlights,
    #[serde(rename = "centroid")]
    Centroids,
    #[serde(rename = "boundary")]
    Boundaries,
    #[serde(rename = "limit")]
    Limits,
    #[serde(rename = "position")]
    Positions,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Highlights => "highlights",
            PayloadKind::Centroids => "centroid",
            PayloadKind::Boundaries => "boundary",
            PayloadKind::Limits => "limit",
            PayloadKind::Positions => "position",
        }
    }
}

/// Boundary detail level, 1 (fastest) to 15 (finest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution(u8);

impl Resolution {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 15;

    pub const WORLD_LOW: Resolution = Resolution(1);
    pub const WORLD_MEDIUM: Resolution = Resolution(2);
    pub const WORLD_HIGH: Resolution = Resolution(3);
    pub const COUNTRY_LOW: Resolution = Resolution(4);
    pub const COUNTRY_MEDIUM: Resolution = Resolution(5);
    pub const COUNTRY_HIGH: Resolution = Resolution(6);
    pub const STATE_LOW: Resolution = Resolution(7);
    pub const STATE_MEDIUM: Resolution = Resolution(8);
    pub const STATE_HIGH: Resolution = Resolution(9);
    pub const COUNTY_LOW: Resolution = Resolution(10);
    pub const COUNTY_MEDIUM: Resolution = Resolution(11);
    pub const COUNTY_HIGH: Resolution = Resolution(12);
    pub const CITY_LOW: Resolution = Resolution(13);
    pub const CITY_MEDIUM: Resolution = Resolution(14);
    pub const CITY_HIGH: Resolution = Resolution(15);

    pub fn new(value: i64) -> Result<Self> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(GeocodingError::ResolutionOutOfRange(value));
        }
        Ok(Resolution(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Resolution picked from the level and the number of objects shown.
    ///
    /// Prefers speed over quality; `inc_res` raises the result, capped at 15.
    pub fn autodetect(level: LevelKind, count: usize, inc_res: u8) -> Self {
        let detected = match level {
            LevelKind::Country => {
                if count < 3 {
                    Self::WORLD_HIGH
                } else {
                    Self::WORLD_LOW
                }
            }
            LevelKind::State => {
                if count < 3 {
                    Self::STATE_LOW
                } else if count < 10 {
                    Self::COUNTRY_LOW
                } else {
                    Self::WORLD_MEDIUM
                }
            }
            LevelKind::County => {
                if count < 5 {
                    Self::COUNTY_LOW
                } else if count < 20 {
                    Self::STATE_MEDIUM
                } else {
                    Self::WORLD_HIGH
                }
            }
            LevelKind::City => {
                if count < 5 {
                    Self::CITY_LOW
                } else if count < 50 {
                    Self::COUNTRY_LOW
                } else {
                    Self::WORLD_HIGH
                }
            }
        };

        Resolution(detected.0.saturating_add(inc_res).min(Self::MAX))
    }
}

impl FromStr for Resolution {
    type Err = GeocodingError;

    fn from_str(s: &str) -> Result<Self> {
        let resolution = match s.to_lowercase().as_str() {
            "world" | "world_medium" => Self::WORLD_MEDIUM,
            "country" | "country_medium" => Self::COUNTRY_MEDIUM,
            "state" | "state_medium" => Self::STATE_MEDIUM,
            "county" | "county_medium" => Self::COUNTY_MEDIUM,
            "city" | "city_medium" => Self::CITY_MEDIUM,
            "world_low" => Self::WORLD_LOW,
            "world_high" => Self::WORLD_HIGH,
            "country_low" => Self::COUNTRY_LOW,
            "country_high" => Self::COUNTRY_HIGH,
            "state_low" => Self::STATE_LOW,
            "state_high" => Self::STATE_HIGH,
            "county_low" => Self::COUNTY_LOW,
            "county_high" => Self::COUNTY_HIGH,
            "city_low" => Self::CITY_LOW,
            "city_high" => Self::CITY_HIGH,
            other => match other.parse::<i64>() {
                Ok(value) => Self::new(value)?,
                Err(_) => return Err(GeocodingError::InvalidResolution(s.to_string())),
            },
        };
        Ok(resolution)
    }
}

/// Name-based lookup of an ordered list of queries
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingRequest {
    pub requested_payload: Vec<PayloadKind>,
    pub resolution: Option<Resolution>,
    pub region_queries: Vec<RegionQuery>,
    pub scope: Vec<MapRegion>,
    pub level: Option<LevelKind>,
    pub namesake_example_limit: usize,
    pub allow_ambiguous: bool,
}

impl GeocodingRequest {
    pub fn new(
        requested_payload: Vec<PayloadKind>,
        region_queries: Vec<RegionQuery>,
        scope: Vec<MapRegion>,
        level: Option<LevelKind>,
        allow_ambiguous: bool,
    ) -> Result<Self> {
        check_required_parameters(&region_queries, level)?;

        Ok(Self {
            requested_payload,
            resolution: None,
            region_queries,
            scope,
            level,
            namesake_example_limit: NAMESAKE_MAX_COUNT,
            allow_ambiguous,
        })
    }

    pub fn with_namesake_example_limit(mut self, limit: usize) -> Self {
        self.namesake_example_limit = limit;
        self
    }
}

fn check_required_parameters(queries: &[RegionQuery], level: Option<LevelKind>) -> Result<()> {
    if queries.is_empty() && level.is_none() {
        return Err(GeocodingError::MissingArgument(MISSING_LEVEL_AND_SCOPE_OR_REQUEST));
    }

    for query in queries {
        let has_request = query.request.as_deref().is_some_and(|r| !r.is_empty());
        if has_request || level.is_some() {
            continue;
        }

        if query.scope.is_some() {
            return Err(GeocodingError::MissingArgument(MISSING_LEVEL_OR_REQUEST));
        }
        return Err(GeocodingError::MissingArgument(MISSING_LEVEL_AND_SCOPE_OR_REQUEST));
    }

    Ok(())
}

/// Lookup of already known object ids
#[derive(Debug, Clone, PartialEq)]
pub struct ExplicitRequest {
    pub requested_payload: Vec<PayloadKind>,
    pub ids: Vec<String>,
    pub resolution: Option<Resolution>,
}

impl ExplicitRequest {
    pub fn new(requested_payload: Vec<PayloadKind>, ids: Vec<String>) -> Self {
        Self { requested_payload, ids, resolution: None }
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }
}

/// Lookup of the objects containing given coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseGeocodingRequest {
    pub requested_payload: Vec<PayloadKind>,
    pub resolution: Option<Resolution>,
    pub coordinates: Vec<GeoPoint>,
    pub level: LevelKind,
    pub scope: Option<MapRegion>,
}

/// Any request the protocol client can send
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Geocoding(GeocodingRequest),
    Explicit(ExplicitRequest),
    Reverse(ReverseGeocodingRequest),
}

impl Request {
    pub fn requested_payload(&self) -> &[PayloadKind] {
        match self {
            Request::Geocoding(r) => &r.requested_payload,
            Request::Explicit(r) => &r.requested_payload,
            Request::Reverse(r) => &r.requested_payload,
        }
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self {
            Request::Geocoding(r) => r.resolution,
            Request::Explicit(r) => r.resolution,
            Request::Reverse(r) => r.resolution,
        }
    }

    /// Wire name of the request mode
    pub fn mode(&self) -> &'static str {
        match self {
            Request::Geocoding(_) => "by_geocoding",
            Request::Explicit(_) => "by_id",
            Request::Reverse(_) => "reverse",
        }
    }
}

impl From<GeocodingRequest> for Request {
    fn from(request: GeocodingRequest) -> Self {
        Request::Geocoding(request)
    }
}

impl From<ExplicitRequest> for Request {
    fn from(request: ExplicitRequest) -> Self {
        Request::Explicit(request)
    }
}

impl From<ReverseGeocodingRequest> for Request {
    fn from(request: ReverseGeocodingRequest) -> Self {
        Request::Reverse(request)
    }
}
