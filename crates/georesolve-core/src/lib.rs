//! georesolve core - Geocoding request model, builder and configuration
//!
//! This crate holds the value types exchanged with a geocoding service, the
//! builder that composes name-based requests and the error taxonomy shared by
//! the client crate.

pub mod config;
pub mod error;
pub mod geocoder;
pub mod models;

pub use error::{GeocodingError, Result};
pub use geocoder::{
    geocode, geocode_cities, geocode_counties, geocode_countries, geocode_states, reverse_geocode,
    Geocoder, Parent, ReverseGeocoder, Where, WhereScope,
};
