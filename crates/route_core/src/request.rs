//! Route request construction.
//!
//! A [`RouteQuery`] is a snapshot of the form at submit time. Values are sent
//! as the text the fields hold; nothing is required to be set; the backend
//! rejects incomplete queries itself.

use std::fmt;

use crate::geo::CoordinateField;
use crate::position::{format_coordinate, PositionModel};
use crate::transport::TransportState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::AStar, Algorithm::Dijkstra];

    /// Identifier expected by the backend. The Dijkstra spelling is the
    /// backend's, not a typo to fix here.
    pub fn wire_name(self) -> &'static str {
        match self {
            Algorithm::AStar => "astar",
            Algorithm::Dijkstra => "djikstra",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::AStar => "A-star",
            Algorithm::Dijkstra => "Dijkstra",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub start_lat: String,
    pub start_lon: String,
    pub end_lat: String,
    pub end_lon: String,
    pub vehicle_speed: String,
    pub algorithm: Algorithm,
}

impl RouteQuery {
    pub fn from_form(
        position: &PositionModel,
        transport: &TransportState,
        algorithm: Algorithm,
    ) -> Self {
        let text = |field| format_coordinate(position.coordinate(field));
        Self {
            start_lat: text(CoordinateField::StartLat),
            start_lon: text(CoordinateField::StartLong),
            end_lat: text(CoordinateField::EndLat),
            end_lon: text(CoordinateField::EndLong),
            vehicle_speed: transport.speed_text().to_string(),
            algorithm,
        }
    }

    /// Query parameters in the order the backend documents them.
    pub fn query_pairs(&self) -> [(&'static str, &str); 6] {
        [
            ("start_lat", self.start_lat.as_str()),
            ("start_lon", self.start_lon.as_str()),
            ("end_lat", self.end_lat.as_str()),
            ("end_lon", self.end_lon.as_str()),
            ("vehicle_speed", self.vehicle_speed.as_str()),
            ("algorithm", self.algorithm.wire_name()),
        ]
    }
}

/// Handle for one submission. Sequence numbers increase monotonically per
/// planner and only serve to correlate log lines and applied responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket {
    pub sequence: u64,
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.sequence)
    }
}
