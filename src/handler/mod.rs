//! Request handler module
//!
//! Method validation, health checks, JSON content routes and dispatch to the
//! asset responder.

pub mod content;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
