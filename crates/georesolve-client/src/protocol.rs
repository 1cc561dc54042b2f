//! JSON wire protocol of the geocoding service

pub mod boundary;
pub mod json_request;
pub mod json_response;

pub use boundary::parse_boundary;
pub use json_request::format_request;
pub use json_response::parse_response;

pub const PROTOCOL_VERSION: u32 = 3;
