//! Routing backend abstraction.
//!
//! The planner only knows this trait; the HTTP implementation lives in
//! [`crate::client`] behind the `http` feature, and tests plug in stubs.

use crate::error::BackendError;
use crate::payload::{BoundingBox, RoutePayload};
use crate::request::RouteQuery;

/// Implementations must be `Send + Sync`: each submission runs the call on its
/// own worker thread.
pub trait RouteBackend: Send + Sync {
    /// Compute routes for the query.
    fn fetch_route(&self, query: &RouteQuery) -> Result<RoutePayload, BackendError>;

    /// Fetch the envelope from a separate endpoint. Backends without one
    /// return `Ok(None)` without doing any I/O.
    fn fetch_bounding_box(&self, _query: &RouteQuery) -> Result<Option<BoundingBox>, BackendError> {
        Ok(None)
    }
}
