#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use route_core::backend::RouteBackend;
use route_core::error::BackendError;
use route_core::geo::{Endpoint, LngLat};
use route_core::payload::RoutePayload;
use route_core::planner::RoutePlanner;
use route_core::request::RouteQuery;
use serde_json::Value;

pub const WAIT: Duration = Duration::from_secs(5);

/// Backend whose requests block until the test releases them, keyed by the
/// speed text of the query. Lets a test choose the order responses arrive in.
#[derive(Default)]
pub struct GatedBackend {
    gates: Mutex<HashMap<String, Sender<Result<Value, u16>>>>,
}

impl GatedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer the request submitted with `speed_text`, waiting for it to
    /// reach the backend first.
    pub fn release(&self, speed_text: &str, answer: Result<Value, u16>) {
        let deadline = Instant::now() + WAIT;
        loop {
            if let Some(gate) = self.gates.lock().unwrap().remove(speed_text) {
                gate.send(answer).expect("request thread alive");
                return;
            }
            assert!(
                Instant::now() < deadline,
                "request {speed_text} never arrived"
            );
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}

impl RouteBackend for GatedBackend {
    fn fetch_route(&self, query: &RouteQuery) -> Result<RoutePayload, BackendError> {
        let (sender, receiver): (_, Receiver<Result<Value, u16>>) = std::sync::mpsc::channel();
        self.gates
            .lock()
            .unwrap()
            .insert(query.vehicle_speed.clone(), sender);
        match receiver.recv().expect("test released the request") {
            Ok(body) => Ok(RoutePayload::from_json(body)?),
            Err(status) => Err(BackendError::Status(status)),
        }
    }
}

pub fn planner_with(backend: Arc<dyn RouteBackend>) -> RoutePlanner {
    RoutePlanner::new(backend)
}

/// Planner with both endpoints set to the sample route.
pub fn planner_with_endpoints(backend: Arc<dyn RouteBackend>) -> RoutePlanner {
    let mut planner = RoutePlanner::new(backend);
    planner.update_from_map_click(Endpoint::Start, LngLat::new(21.006725, 52.231958));
    planner.update_from_map_click(Endpoint::End, LngLat::new(20.9851, 52.2297));
    planner
}

pub fn filled_slots(planner: &RoutePlanner) -> Vec<usize> {
    planner
        .presentation()
        .slots()
        .iter()
        .enumerate()
        .filter(|(_, slot)| !slot.is_empty())
        .map(|(index, _)| index)
        .collect()
}
