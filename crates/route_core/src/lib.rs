//! Core state for the route planner front end.
//!
//! Everything that has invariants lives here: the endpoint position model, the
//! transport/speed resolver, request construction, payload parsing and the
//! multi-route presentation state. The GUI crate only renders what
//! [`planner::RoutePlanner`] exposes and forwards user events back into it.

pub mod backend;
pub mod binding;
pub mod config;
pub mod details;
pub mod error;
pub mod geo;
pub mod payload;
pub mod planner;
pub mod position;
pub mod presentation;
pub mod request;
pub mod style;
pub mod transport;

#[cfg(feature = "http")]
pub mod client;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
