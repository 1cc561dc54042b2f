pub mod geometry;
pub mod query;
pub mod region;
pub mod request;
pub mod resolver;
pub mod response;

pub use geometry::{Boundary, GeoPoint, GeoRect, Multipolygon, Polygon, Ring, ANTIMERIDIAN};
pub use query::RegionQuery;
pub use region::{LevelKind, MapRegion};
pub use request::{
    ExplicitRequest, GeocodingRequest, PayloadKind, Request, Resolution, ReverseGeocodingRequest,
    NAMESAKE_MAX_COUNT,
};
pub use resolver::{AmbiguityResolver, IgnoringStrategy};
pub use response::{
    format_ambiguous_message, AmbiguousFeature, Answer, Feature, Namesake, NamesakeParent,
    Response, SuccessResponse,
};
