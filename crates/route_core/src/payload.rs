//! Parsing of routing backend responses.
//!
//! The backend answers in one of three shapes depending on how it is deployed:
//!
//! - a single GeoJSON object carrying a `metadata` member (one route);
//! - a JSON array of such objects, one per route slot (`null`, `false` or `{}`
//!   entries mark slots without a route);
//! - an object `{ "routes": [...], "bounding_box": ... }`.
//!
//! A `bounding_box` member may accompany the single-object and wrapped shapes.
//! Missing or empty `metadata` is not an error: it means the slot has no
//! computed route to describe.

use geojson::GeoJson;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::PayloadError;
use crate::geo::LngLat;

const BOUNDING_BOX_KEY: &str = "bounding_box";

/// Polylines and polygon rings extracted from a GeoJSON document, in the
/// order they appear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryPaths {
    pub lines: Vec<Vec<LngLat>>,
    pub rings: Vec<Vec<LngLat>>,
}

impl GeometryPaths {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rings.is_empty()
    }

    fn collect_geojson(&mut self, geojson: &GeoJson) {
        match geojson {
            GeoJson::Geometry(geometry) => self.collect_geometry(geometry),
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    self.collect_geometry(geometry);
                }
            }
            GeoJson::FeatureCollection(collection) => {
                for feature in &collection.features {
                    if let Some(geometry) = &feature.geometry {
                        self.collect_geometry(geometry);
                    }
                }
            }
        }
    }

    fn collect_geometry(&mut self, geometry: &geojson::Geometry) {
        match &geometry.value {
            geojson::Value::Point(_) | geojson::Value::MultiPoint(_) => {}
            geojson::Value::LineString(line) => self.lines.push(to_path(line)),
            geojson::Value::MultiLineString(lines) => {
                self.lines.extend(lines.iter().map(|line| to_path(line)));
            }
            geojson::Value::Polygon(rings) => {
                self.rings.extend(rings.iter().map(|ring| to_path(ring)));
            }
            geojson::Value::MultiPolygon(polygons) => {
                for rings in polygons {
                    self.rings.extend(rings.iter().map(|ring| to_path(ring)));
                }
            }
            geojson::Value::GeometryCollection(geometries) => {
                for inner in geometries {
                    self.collect_geometry(inner);
                }
            }
        }
    }
}

fn to_path(positions: &[geojson::Position]) -> Vec<LngLat> {
    positions
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| LngLat::new(position[0], position[1]))
        .collect()
}

/// A GeoJSON document as handed to the map surface, plus its paths for
/// renderers that draw shapes themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGeometry {
    pub geojson: GeoJson,
    pub paths: GeometryPaths,
}

impl MapGeometry {
    pub fn from_geojson(geojson: GeoJson) -> Self {
        let mut paths = GeometryPaths::default();
        paths.collect_geojson(&geojson);
        Self { geojson, paths }
    }

    fn from_json(value: Value, context: &str) -> Result<Self, PayloadError> {
        let geojson = GeoJson::from_json_value(value).map_err(|source| PayloadError::Geometry {
            context: context.to_string(),
            source: Box::new(source),
        })?;
        Ok(Self::from_geojson(geojson))
    }
}

/// Summary the backend attaches to each computed route.
///
/// Numeric members are accepted either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouteMetadata {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_distance_meters: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_time_seconds: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub vehicle_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub criterion: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub algorithm: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub algorithm_duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub function_duration: Option<f64>,
    /// Vehicle profile name reported by single-route deployments.
    #[serde(default, deserialize_with = "lenient::text")]
    pub vehicle: Option<String>,
    /// Speed reported by single-route deployments instead of `vehicle_speed`.
    #[serde(default, deserialize_with = "lenient::number")]
    pub max_speed_kmh: Option<f64>,
}

impl RouteMetadata {
    /// `None` for a missing, null, empty or unreadable metadata member.
    fn from_member(slot: usize, value: Option<Value>) -> Option<Self> {
        match value? {
            Value::Object(map) if map.is_empty() => None,
            Value::Object(map) => match serde_json::from_value(Value::Object(map)) {
                Ok(metadata) => Some(metadata),
                Err(err) => {
                    log::warn!("ignoring unreadable metadata for route slot {slot}: {err}");
                    None
                }
            },
            Value::Null => None,
            other => {
                log::warn!(
                    "ignoring metadata of type {} for route slot {slot}",
                    json_kind(&other)
                );
                None
            }
        }
    }

    /// Vehicle speed, falling back to the single-route `max_speed_kmh` member.
    pub fn effective_vehicle_speed(&self) -> Option<f64> {
        self.vehicle_speed.or(self.max_speed_kmh)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub geometry: Option<MapGeometry>,
    pub metadata: Option<RouteMetadata>,
}

/// One position of the route slate. `Empty` is the explicit "no route" marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RouteSlot {
    #[default]
    Empty,
    Route(RouteResult),
}

impl RouteSlot {
    pub fn route(&self) -> Option<&RouteResult> {
        match self {
            RouteSlot::Empty => None,
            RouteSlot::Route(route) => Some(route),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RouteSlot::Empty)
    }

    pub fn metadata(&self) -> Option<&RouteMetadata> {
        self.route().and_then(|route| route.metadata.as_ref())
    }

    pub fn geometry(&self) -> Option<&MapGeometry> {
        self.route().and_then(|route| route.geometry.as_ref())
    }

    /// Malformed entries are logged and become `Empty`; they never fail the
    /// rest of the slate.
    fn from_json(slot: usize, value: Value) -> Self {
        match Self::try_from_json(slot, value) {
            Ok(route) => route,
            Err(err) => {
                log::warn!("dropping route slot {slot}: {err}");
                RouteSlot::Empty
            }
        }
    }

    fn try_from_json(slot: usize, value: Value) -> Result<Self, PayloadError> {
        let mut map = match value {
            Value::Null | Value::Bool(false) => return Ok(RouteSlot::Empty),
            Value::Object(map) => map,
            other => return Err(PayloadError::UnexpectedShape(json_kind(&other))),
        };

        let metadata = RouteMetadata::from_member(slot, map.remove("metadata"));
        map.remove(BOUNDING_BOX_KEY);

        let context = format!("route slot {slot}");
        let geometry = if map.contains_key("type") {
            Some(MapGeometry::from_json(Value::Object(map), &context)?)
        } else {
            match map.remove("geometry") {
                Some(Value::Null) | None => None,
                Some(value) => Some(MapGeometry::from_json(value, &context)?),
            }
        };
        let geometry = geometry.filter(|geometry| !geometry.paths.is_empty());

        if geometry.is_none() && metadata.is_none() {
            return Ok(RouteSlot::Empty);
        }
        Ok(RouteSlot::Route(RouteResult { geometry, metadata }))
    }
}

/// Search/result envelope drawn as a translucent fill.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub geometry: MapGeometry,
}

impl BoundingBox {
    /// Accepts any GeoJSON object or a `[min_lng, min_lat, max_lng, max_lat]`
    /// array. `null` yields `None`.
    pub fn from_json(value: Value) -> Result<Option<Self>, PayloadError> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => {
                let corners: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
                if corners.len() != 4 || items.len() != 4 {
                    return Err(PayloadError::UnexpectedShape("array"));
                }
                Ok(Some(Self::from_corners(
                    corners[0], corners[1], corners[2], corners[3],
                )))
            }
            value @ Value::Object(_) => Ok(Some(Self {
                geometry: MapGeometry::from_json(value, BOUNDING_BOX_KEY)?,
            })),
            other => Err(PayloadError::UnexpectedShape(json_kind(&other))),
        }
    }

    pub fn from_corners(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        let ring = vec![
            vec![min_lng, min_lat],
            vec![max_lng, min_lat],
            vec![max_lng, max_lat],
            vec![min_lng, max_lat],
            vec![min_lng, min_lat],
        ];
        let geometry = geojson::Geometry::new(geojson::Value::Polygon(vec![ring]));
        Self {
            geometry: MapGeometry::from_geojson(GeoJson::Geometry(geometry)),
        }
    }
}

/// A decoded backend response: the new route slate plus an optional envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePayload {
    pub slots: Vec<RouteSlot>,
    pub bounding_box: Option<BoundingBox>,
}

impl RoutePayload {
    pub fn from_json(value: Value) -> Result<Self, PayloadError> {
        let (entries, bounding_box) = match value {
            Value::Array(entries) => (entries, None),
            Value::Object(mut map) => {
                let bounding_box = map.remove(BOUNDING_BOX_KEY);
                match map.remove("routes") {
                    Some(Value::Array(routes)) => (routes, bounding_box),
                    Some(other) => {
                        map.insert("routes".to_string(), other);
                        (vec![Value::Object(map)], bounding_box)
                    }
                    None => (vec![Value::Object(map)], bounding_box),
                }
            }
            other => return Err(PayloadError::UnexpectedShape(json_kind(&other))),
        };

        let slots = entries
            .into_iter()
            .enumerate()
            .map(|(slot, entry)| RouteSlot::from_json(slot, entry))
            .collect();
        let bounding_box = match bounding_box.map(BoundingBox::from_json) {
            Some(Ok(bounding_box)) => bounding_box,
            Some(Err(err)) => {
                log::warn!("ignoring unreadable bounding box: {err}");
                None
            }
            None => None,
        };

        Ok(Self {
            slots,
            bounding_box,
        })
    }

    pub fn parse_str(body: &str) -> Result<Self, PayloadError> {
        Self::from_json(serde_json::from_str(body)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Flag(bool),
    }

    pub(super) fn number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<Raw>::deserialize(de)? {
            Some(Raw::Number(value)) => Some(value),
            Some(Raw::Text(text)) => text.trim().parse().ok(),
            Some(Raw::Flag(_)) | None => None,
        })
    }

    pub(super) fn text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Raw>::deserialize(de)? {
            Some(Raw::Number(value)) => Some(value.to_string()),
            Some(Raw::Text(text)) => Some(text),
            Some(Raw::Flag(flag)) => Some(flag.to_string()),
            None => None,
        })
    }
}

#[cfg(test)]
mod tests;
