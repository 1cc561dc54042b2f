//! georesolve client - Round trips to a geocoding service
//!
//! Sends requests composed with `georesolve-core`, decodes the responses and
//! turns resolved features into ordered tables of names and geometries.

pub mod client;
pub mod geocodes;
pub mod http;
pub mod ports;
pub mod protocol;
pub mod table;

pub use client::{GeocoderRef, GeocodingClient};
pub use geocodes::{select_request_string, Geocodes};
pub use http::HttpGeocodingService;
pub use ports::GeocodingService;
pub use table::{
    BoundariesTable, CentroidsTable, GeoRow, GeoTable, LimitsTable, PlacesTable, PositionsTable,
};
