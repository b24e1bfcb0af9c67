//! Geographic primitives shared by the position model and the map binding.

use std::ops::RangeInclusive;

pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// A coordinate pair as produced by the map surface (`[lng, lat]` order).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// One endpoint of a route. Either coordinate may be unset while the user is
/// still entering it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoPoint {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl GeoPoint {
    pub const UNSET: GeoPoint = GeoPoint {
        lat: None,
        lng: None,
    };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
        }
    }

    /// Both coordinates, if both are set.
    pub fn lng_lat(&self) -> Option<LngLat> {
        Some(LngLat::new(self.lng?, self.lat?))
    }

    pub fn is_unset(&self) -> bool {
        self.lat.is_none() && self.lng.is_none()
    }

    pub fn coordinate(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Latitude => self.lat,
            Axis::Longitude => self.lng,
        }
    }
}

impl From<LngLat> for GeoPoint {
    fn from(value: LngLat) -> Self {
        GeoPoint::new(value.lat, value.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn accepts(self, value: f64) -> bool {
        match self {
            Axis::Latitude => LATITUDE_RANGE.contains(&value),
            Axis::Longitude => LONGITUDE_RANGE.contains(&value),
        }
    }
}

/// The four numeric coordinate inputs of the sidebar form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateField {
    StartLat,
    StartLong,
    EndLat,
    EndLong,
}

impl CoordinateField {
    pub const ALL: [CoordinateField; 4] = [
        CoordinateField::StartLat,
        CoordinateField::StartLong,
        CoordinateField::EndLat,
        CoordinateField::EndLong,
    ];

    pub fn endpoint(self) -> Endpoint {
        match self {
            CoordinateField::StartLat | CoordinateField::StartLong => Endpoint::Start,
            CoordinateField::EndLat | CoordinateField::EndLong => Endpoint::End,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            CoordinateField::StartLat | CoordinateField::EndLat => Axis::Latitude,
            CoordinateField::StartLong | CoordinateField::EndLong => Axis::Longitude,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            CoordinateField::StartLat => "startLatField",
            CoordinateField::StartLong => "startLongField",
            CoordinateField::EndLat => "endLatField",
            CoordinateField::EndLong => "endLongField",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.id() == id)
    }

    /// Position of this field in [`CoordinateField::ALL`].
    pub fn index(self) -> usize {
        match self {
            CoordinateField::StartLat => 0,
            CoordinateField::StartLong => 1,
            CoordinateField::EndLat => 2,
            CoordinateField::EndLong => 3,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            CoordinateField::StartLat => "Latitude A...",
            CoordinateField::StartLong => "Longitude A...",
            CoordinateField::EndLat => "Latitude B...",
            CoordinateField::EndLong => "Longitude B...",
        }
    }
}

/// Draggable endpoint markers on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    Start,
    End,
}

impl MarkerId {
    pub fn endpoint(self) -> Endpoint {
        match self {
            MarkerId::Start => Endpoint::Start,
            MarkerId::End => Endpoint::End,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            MarkerId::Start => "startMarker",
            MarkerId::End => "endMarker",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        [MarkerId::Start, MarkerId::End]
            .into_iter()
            .find(|marker| marker.id() == id)
    }
}
