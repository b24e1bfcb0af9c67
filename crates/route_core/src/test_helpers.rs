//! Test helpers for common test setup and utilities.
//!
//! Sample backend bodies in every shape the payload parser accepts, and a
//! backend that answers from memory.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::backend::RouteBackend;
use crate::error::BackendError;
use crate::payload::{BoundingBox, RoutePayload};
use crate::planner::RoutePlanner;
use crate::request::RouteQuery;

/// Start of the sample routes, central Warsaw.
pub const SAMPLE_START: (f64, f64) = (21.006725, 52.231958);
/// End of the sample routes.
pub const SAMPLE_END: (f64, f64) = (20.9851, 52.2297);

/// One route feature with metadata, as returned per slot by the backend.
pub fn sample_route_feature(slot: usize) -> Value {
    let offset = slot as f64 * 0.001;
    json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": [
                [SAMPLE_START.0, SAMPLE_START.1 + offset],
                [21.0, 52.2305 + offset],
                [SAMPLE_END.0, SAMPLE_END.1 + offset]
            ]
        },
        "properties": {},
        "metadata": {
            "total_distance_meters": 1650.0 + slot as f64 * 100.0,
            "total_time_seconds": 3725.0,
            "vehicle_speed": 140,
            "criterion": "time",
            "algorithm": "astar",
            "algorithm_duration": 0.012,
            "function_duration": 0.034
        }
    })
}

/// A single-route deployment body: a FeatureCollection with `metadata`.
pub fn single_route_body() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [
                    [SAMPLE_START.0, SAMPLE_START.1],
                    [SAMPLE_END.0, SAMPLE_END.1]
                ]
            },
            "properties": {}
        }],
        "metadata": {
            "total_time_seconds": 812.4,
            "total_distance_meters": 1650.2,
            "vehicle": "car",
            "max_speed_kmh": 140
        }
    })
}

/// An array body with one route per slot.
pub fn multi_route_body(routes: usize) -> Value {
    Value::Array((0..routes).map(sample_route_feature).collect())
}

/// A wrapped body carrying a corner-array bounding box.
pub fn wrapped_route_body(routes: usize) -> Value {
    json!({
        "routes": multi_route_body(routes),
        "bounding_box": [20.98, 52.22, 21.01, 52.24]
    })
}

pub fn sample_payload(routes: usize) -> RoutePayload {
    RoutePayload::from_json(multi_route_body(routes)).expect("sample body should parse")
}

/// Backend that answers every request with the same canned result and
/// records the queries it saw.
#[derive(Debug)]
pub struct StaticBackend {
    body: Value,
    bounding_box: Option<Value>,
    fail_status: Option<u16>,
    queries: Mutex<Vec<RouteQuery>>,
}

impl StaticBackend {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            bounding_box: None,
            fail_status: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Answer every route request with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::new(Value::Null)
        }
    }

    /// Also serve a separate bounding-box endpoint.
    pub fn with_bounding_box(mut self, bounding_box: Value) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    pub fn queries(&self) -> Vec<RouteQuery> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

impl RouteBackend for StaticBackend {
    fn fetch_route(&self, query: &RouteQuery) -> Result<RoutePayload, BackendError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }
        if let Some(status) = self.fail_status {
            return Err(BackendError::Status(status));
        }
        Ok(RoutePayload::from_json(self.body.clone())?)
    }

    fn fetch_bounding_box(&self, _query: &RouteQuery) -> Result<Option<BoundingBox>, BackendError> {
        match &self.bounding_box {
            Some(value) => Ok(BoundingBox::from_json(value.clone())?),
            None => Ok(None),
        }
    }
}

/// A planner backed by a [`StaticBackend`] answering with `body`.
pub fn planner_with_body(body: Value) -> (RoutePlanner, Arc<StaticBackend>) {
    let backend = Arc::new(StaticBackend::new(body));
    let planner = RoutePlanner::new(backend.clone());
    (planner, backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_bodies_parse() {
        assert_eq!(sample_payload(3).slots.len(), 3);
        let single = RoutePayload::from_json(single_route_body()).unwrap();
        assert_eq!(single.slots.len(), 1);
        let wrapped = RoutePayload::from_json(wrapped_route_body(2)).unwrap();
        assert!(wrapped.bounding_box.is_some());
    }

    #[test]
    fn static_backend_records_queries() {
        let backend = StaticBackend::new(multi_route_body(1));
        let query = RouteQuery::from_form(
            &crate::position::PositionModel::new(),
            &crate::transport::TransportState::default(),
            crate::request::Algorithm::AStar,
        );
        backend.fetch_route(&query).unwrap();
        assert_eq!(backend.queries(), vec![query]);
    }
}
