//! Canonical start/end positions.
//!
//! Map clicks, marker drags and the numeric sidebar fields all write through
//! this model. Field input is validated and silently dropped when it is not a
//! number or out of range; map coordinates are always taken as-is.

use crate::geo::{Axis, CoordinateField, Endpoint, GeoPoint, LngLat};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionModel {
    start: GeoPoint,
    end: GeoPoint,
}

impl PositionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> &GeoPoint {
        &self.start
    }

    pub fn end(&self) -> &GeoPoint {
        &self.end
    }

    pub fn point(&self, endpoint: Endpoint) -> &GeoPoint {
        match endpoint {
            Endpoint::Start => &self.start,
            Endpoint::End => &self.end,
        }
    }

    fn point_mut(&mut self, endpoint: Endpoint) -> &mut GeoPoint {
        match endpoint {
            Endpoint::Start => &mut self.start,
            Endpoint::End => &mut self.end,
        }
    }

    /// Current value behind a coordinate field.
    pub fn coordinate(&self, field: CoordinateField) -> Option<f64> {
        self.point(field.endpoint()).coordinate(field.axis())
    }

    /// Apply a raw text edit from one of the coordinate fields.
    ///
    /// Returns `true` when the value was accepted. Non-numeric and
    /// out-of-range input leaves the model untouched.
    pub fn update_from_field(&mut self, field: CoordinateField, raw: &str) -> bool {
        let Some(value) = parse_coordinate(raw) else {
            return false;
        };
        if !field.axis().accepts(value) {
            return false;
        }
        let point = self.point_mut(field.endpoint());
        match field.axis() {
            Axis::Latitude => point.lat = Some(value),
            Axis::Longitude => point.lng = Some(value),
        }
        true
    }

    pub fn update_from_map_click(&mut self, endpoint: Endpoint, lng_lat: LngLat) {
        *self.point_mut(endpoint) = lng_lat.into();
    }

    pub fn update_from_marker_drag(&mut self, endpoint: Endpoint, lng_lat: LngLat) {
        *self.point_mut(endpoint) = lng_lat.into();
    }

    pub fn swap_endpoints(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
    }

    pub fn reset(&mut self, endpoint: Endpoint) {
        *self.point_mut(endpoint) = GeoPoint::UNSET;
    }
}

/// Text shown in a coordinate field for a model value. Unset renders empty.
///
/// `f64`'s `Display` is shortest-round-trip, so parsing this text back yields
/// the identical bits.
pub fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}
