//! Geocoding service port

use georesolve_core::error::Result;
use georesolve_core::models::{Request, Response};

/// Port for a geocoding service round trip
pub trait GeocodingService: Send + Sync {
    /// Send one request and return the decoded response
    ///
    /// # Arguments
    /// * `request` - Geocoding, explicit or reverse request
    ///
    /// # Returns
    /// The service outcome; transport and decoding failures are errors,
    /// `Ambiguous` and `Error` outcomes are returned as responses
    fn do_request(&self, request: &Request) -> Result<Response>;
}
