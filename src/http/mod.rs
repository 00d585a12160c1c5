//! HTTP protocol layer module
//!
//! Media types, cache directives and response builders. Nothing here knows
//! where assets or records come from.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_asset_response, build_error_response, build_health_response,
    build_json_response,
};
