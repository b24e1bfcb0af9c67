//! Detail cards shown next to the map, one per route slot with metadata.

use crate::payload::RouteMetadata;

/// A rendered card. The header (color, number, hide toggle) is always shown;
/// `body` is `None` while the route is hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailCard {
    pub index: usize,
    pub color: &'static str,
    pub hidden: bool,
    pub body: Option<Vec<DetailRow>>,
}

impl DetailCard {
    /// One-based number shown in the card title.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn title(&self) -> String {
        format!("Route no. {}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

const MISSING: &str = "-";

pub fn detail_rows(metadata: &RouteMetadata) -> Vec<DetailRow> {
    let row = |label, value: Option<String>| DetailRow {
        label,
        value: value.unwrap_or_else(|| MISSING.to_string()),
    };
    vec![
        row(
            "Total distance (m)",
            metadata.total_distance_meters.map(format_number),
        ),
        row(
            "Travel time",
            metadata.total_time_seconds.map(format_travel_time),
        ),
        row(
            "Vehicle speed (km/h)",
            metadata.effective_vehicle_speed().map(format_number),
        ),
        row("Criterion", metadata.criterion.clone()),
        row(
            "Algorithm duration (s)",
            metadata.algorithm_duration.map(format_number),
        ),
        row(
            "Request duration (s)",
            metadata.function_duration.map(format_number),
        ),
        row("Algorithm", metadata.algorithm.clone()),
    ]
}

/// `HH:MM:SS` with floor division on each component. Hours are not capped at
/// two digits. Negative or non-finite input renders as zero.
pub fn format_travel_time(total_seconds: f64) -> String {
    let seconds = if total_seconds.is_finite() && total_seconds > 0.0 {
        total_seconds
    } else {
        0.0
    };
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    let secs = (seconds % 60.0).floor();
    format!("{:02}:{:02}:{:02}", hours as u64, minutes as u64, secs as u64)
}

fn format_number(value: f64) -> String {
    value.to_string()
}
