//! Request encoding for protocol version 3.

use georesolve_core::error::{GeocodingError, Result};
use georesolve_core::models::{
    ExplicitRequest, GeoRect, GeocodingRequest, IgnoringStrategy, LevelKind, MapRegion,
    PayloadKind, RegionQuery, Request, ReverseGeocodingRequest,
};
use serde::Serialize;

use super::PROTOCOL_VERSION;

#[derive(Debug, Serialize)]
struct RequestJson<'a> {
    version: u32,
    mode: &'static str,
    feature_options: &'a [PayloadKind],
    resolution: Option<u8>,
    view_box: Option<GeoRect>,
    fetched_ids: Option<Vec<String>>,
    #[serde(flatten)]
    body: BodyJson<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum BodyJson<'a> {
    Geocoding {
        region_queries: Vec<RegionQueryJson<'a>>,
        scope: Vec<MapRegionJson<'a>>,
        level: Option<LevelKind>,
        namesake_example_limit: usize,
        allow_ambiguous: bool,
    },
    Explicit {
        ids: &'a [String],
    },
    Reverse {
        reverse_coordinates: Vec<[f64; 2]>,
        level: LevelKind,
        reverse_parent: Option<MapRegionJson<'a>>,
    },
}

#[derive(Debug, Serialize)]
struct RegionQueryJson<'a> {
    region_query_names: Vec<&'a str>,
    region_query_countries: Option<MapRegionJson<'a>>,
    region_query_states: Option<MapRegionJson<'a>>,
    region_query_counties: Option<MapRegionJson<'a>>,
    ambiguity_resolver: AmbiguityResolverJson,
    region_query_parent: Option<MapRegionJson<'a>>,
}

#[derive(Debug, Serialize)]
struct AmbiguityResolverJson {
    ambiguity_resolver_ignoring_strategy: Option<IgnoringStrategy>,
    ambiguity_resolver_box: Option<GeoRect>,
    ambiguity_resolver_closest_coord: Option<[f64; 2]>,
}

/// `kind` is true for id sets and false for names
#[derive(Debug, Serialize)]
struct MapRegionJson<'a> {
    kind: bool,
    values: Vec<&'a str>,
}

impl<'a> From<&'a MapRegion> for MapRegionJson<'a> {
    fn from(region: &'a MapRegion) -> Self {
        Self { kind: region.is_ids(), values: region.values() }
    }
}

impl<'a> From<&'a RegionQuery> for RegionQueryJson<'a> {
    fn from(query: &'a RegionQuery) -> Self {
        let resolver = &query.ambiguity_resolver;
        Self {
            region_query_names: query.request.as_deref().into_iter().collect(),
            region_query_countries: query.country.as_ref().map(Into::into),
            region_query_states: query.state.as_ref().map(Into::into),
            region_query_counties: query.county.as_ref().map(Into::into),
            ambiguity_resolver: AmbiguityResolverJson {
                ambiguity_resolver_ignoring_strategy: resolver.ignoring_strategy(),
                ambiguity_resolver_box: resolver.box_(),
                ambiguity_resolver_closest_coord: resolver.closest_coord().map(|p| [p.lon, p.lat]),
            },
            region_query_parent: query.scope.as_ref().map(Into::into),
        }
    }
}

fn geocoding_body(request: &GeocodingRequest) -> BodyJson<'_> {
    BodyJson::Geocoding {
        region_queries: request.region_queries.iter().map(Into::into).collect(),
        scope: request.scope.iter().map(Into::into).collect(),
        level: request.level,
        namesake_example_limit: request.namesake_example_limit,
        allow_ambiguous: request.allow_ambiguous,
    }
}

fn explicit_body(request: &ExplicitRequest) -> BodyJson<'_> {
    BodyJson::Explicit { ids: &request.ids }
}

fn reverse_body(request: &ReverseGeocodingRequest) -> BodyJson<'_> {
    BodyJson::Reverse {
        reverse_coordinates: request.coordinates.iter().map(|p| [p.lon, p.lat]).collect(),
        level: request.level,
        reverse_parent: request.scope.as_ref().map(Into::into),
    }
}

/// Encode a request as a JSON document
pub fn format_request(request: &Request) -> Result<serde_json::Value> {
    let body = match request {
        Request::Geocoding(r) => geocoding_body(r),
        Request::Explicit(r) => explicit_body(r),
        Request::Reverse(r) => reverse_body(r),
    };

    let json = RequestJson {
        version: PROTOCOL_VERSION,
        mode: request.mode(),
        feature_options: request.requested_payload(),
        resolution: request.resolution().map(|r| r.value()),
        view_box: None,
        fetched_ids: None,
        body,
    };

    serde_json::to_value(&json)
        .map_err(|e| GeocodingError::Protocol(format!("Failed to encode request: {}", e)))
}
