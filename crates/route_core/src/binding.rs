//! Glue between the map surface, the sidebar fields and the planner state.
//!
//! Inbound: raw pointer and drag events are classified into position updates.
//! Outbound: [`build_scene`] derives the markers and layers the map surface
//! should show, and [`FieldMirror`] keeps the coordinate text fields in step
//! with the position model.

use serde::{Deserialize, Serialize};

use crate::geo::{CoordinateField, Endpoint, LngLat, MarkerId};
use crate::payload::MapGeometry;
use crate::position::{format_coordinate, PositionModel};
use crate::presentation::PresentationState;
use crate::style::{
    route_slot_color, BOUNDING_BOX_FILL_COLOR, BOUNDING_BOX_OPACITY, BOUNDING_BOX_OUTLINE_COLOR,
    END_MARKER_COLOR, MARKER_CURSOR, ROUTE_LINE_WIDTH, START_MARKER_COLOR,
};

/// Button index of the primary (usually left) mouse button.
pub const PRIMARY_BUTTON: u16 = 0;
/// Button index of the secondary (usually right) mouse button.
pub const SECONDARY_BUTTON: u16 = 2;

/// A pointer event as reported by the map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub lng_lat: LngLat,
    pub button: u16,
    /// Consecutive activations, as in the DOM `detail` field.
    pub click_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Double click; always sets the start point.
    DoubleClick(PointerEvent),
    /// Any non-primary button press; sets the end point only when it passes
    /// [`is_end_point_gesture`].
    AuxiliaryClick(PointerEvent),
    MarkerDragEnd { marker: MarkerId, lng_lat: LngLat },
}

/// End-point selection needs the secondary button *and* a double activation.
/// A single right click is left to the map surface's context behaviour.
pub fn is_end_point_gesture(event: &PointerEvent) -> bool {
    event.button == SECONDARY_BUTTON && event.click_count == 2
}

/// The position update a map event resolves to, if any.
pub fn resolve_map_event(event: &MapEvent) -> Option<(Endpoint, LngLat)> {
    match event {
        MapEvent::DoubleClick(pointer) => Some((Endpoint::Start, pointer.lng_lat)),
        MapEvent::AuxiliaryClick(pointer) if is_end_point_gesture(pointer) => {
            Some((Endpoint::End, pointer.lng_lat))
        }
        MapEvent::AuxiliaryClick(_) => None,
        MapEvent::MarkerDragEnd { marker, lng_lat } => Some((marker.endpoint(), *lng_lat)),
    }
}

/// Initial camera of the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            longitude: 21.006725,
            latitude: 52.231958,
            zoom: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub id: MarkerId,
    pub lng_lat: LngLat,
    pub color: &'static str,
    pub draggable: bool,
    pub cursor: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Line {
        color: &'static str,
        width: f32,
        opacity: f32,
    },
    Fill {
        color: &'static str,
        outline_color: &'static str,
        opacity: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor<'a> {
    pub id: String,
    pub source_id: String,
    pub geometry: &'a MapGeometry,
    pub paint: Paint,
}

/// Everything the map surface draws on top of its base style, bottom to top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapScene<'a> {
    pub layers: Vec<LayerDescriptor<'a>>,
    pub markers: Vec<MarkerDescriptor>,
}

impl MapScene<'_> {
    pub fn marker(&self, id: MarkerId) -> Option<&MarkerDescriptor> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    pub fn layer(&self, id: &str) -> Option<&LayerDescriptor<'_>> {
        self.layers.iter().find(|layer| layer.id == id)
    }
}

pub fn route_layer_id(index: usize) -> String {
    format!("route-line-{index}")
}

pub const BOUNDING_BOX_LAYER_ID: &str = "bounding-box-fill";

/// Derive the scene from current state. Hidden routes keep their layer at
/// zero opacity; endpoints with an unset coordinate get no marker.
pub fn build_scene<'a>(
    position: &PositionModel,
    presentation: &'a PresentationState,
) -> MapScene<'a> {
    let mut layers = Vec::new();

    if let Some(bounding_box) = presentation.bounding_box() {
        layers.push(LayerDescriptor {
            id: BOUNDING_BOX_LAYER_ID.to_string(),
            source_id: "bounding-box".to_string(),
            geometry: &bounding_box.geometry,
            paint: Paint::Fill {
                color: BOUNDING_BOX_FILL_COLOR,
                outline_color: BOUNDING_BOX_OUTLINE_COLOR,
                opacity: BOUNDING_BOX_OPACITY,
            },
        });
    }

    for (index, slot) in presentation.slots().iter().enumerate() {
        let Some(geometry) = slot.geometry() else {
            continue;
        };
        layers.push(LayerDescriptor {
            id: route_layer_id(index),
            source_id: format!("route-{index}"),
            geometry,
            paint: Paint::Line {
                color: route_slot_color(index),
                width: ROUTE_LINE_WIDTH,
                opacity: presentation.line_opacity(index),
            },
        });
    }

    let markers = [
        (MarkerId::Start, START_MARKER_COLOR),
        (MarkerId::End, END_MARKER_COLOR),
    ]
    .into_iter()
    .filter_map(|(id, color)| {
        let lng_lat = position.point(id.endpoint()).lng_lat()?;
        Some(MarkerDescriptor {
            id,
            lng_lat,
            color,
            draggable: true,
            cursor: MARKER_CURSOR,
        })
    })
    .collect();

    MapScene { layers, markers }
}

/// Text buffers behind the four coordinate fields.
///
/// A buffer is overwritten from the model only when the model value differs
/// from the one last synced into it, so an in-progress edit such as `"52."`
/// survives re-renders. Rejected text lives until [`FieldMirror::revert`]
/// snaps the field back to the model, typically when it loses focus.
#[derive(Debug, Clone, Default)]
pub struct FieldMirror {
    texts: [String; 4],
    synced: [Option<u64>; 4],
    rejected: [bool; 4],
}

impl FieldMirror {
    pub fn new(position: &PositionModel) -> Self {
        let mut mirror = Self::default();
        mirror.force_sync(position);
        mirror
    }

    pub fn text(&self, field: CoordinateField) -> &str {
        &self.texts[field.index()]
    }

    pub fn text_mut(&mut self, field: CoordinateField) -> &mut String {
        &mut self.texts[field.index()]
    }

    /// Push the current buffer text into the model. On accept, the buffer is
    /// marked as in sync with the new value so it is not reformatted.
    pub fn commit(&mut self, field: CoordinateField, position: &mut PositionModel) -> bool {
        let accepted = position.update_from_field(field, &self.texts[field.index()]);
        if accepted {
            self.synced[field.index()] = position.coordinate(field).map(f64::to_bits);
        }
        self.rejected[field.index()] = !accepted;
        accepted
    }

    pub fn is_rejected(&self, field: CoordinateField) -> bool {
        self.rejected[field.index()]
    }

    /// Replace rejected text with the model value. Returns whether the buffer
    /// was rewritten.
    pub fn revert(&mut self, field: CoordinateField, position: &PositionModel) -> bool {
        let index = field.index();
        if !self.rejected[index] {
            return false;
        }
        let value = position.coordinate(field);
        self.texts[index] = format_coordinate(value);
        self.synced[index] = value.map(f64::to_bits);
        self.rejected[index] = false;
        true
    }

    pub fn revert_all(&mut self, position: &PositionModel) {
        for field in CoordinateField::ALL {
            self.revert(field, position);
        }
    }

    /// Refresh buffers whose model value changed since the last sync.
    pub fn sync_from(&mut self, position: &PositionModel) {
        for field in CoordinateField::ALL {
            let value = position.coordinate(field);
            let bits = value.map(f64::to_bits);
            if self.synced[field.index()] != bits {
                self.texts[field.index()] = format_coordinate(value);
                self.synced[field.index()] = bits;
                self.rejected[field.index()] = false;
            }
        }
    }

    fn force_sync(&mut self, position: &PositionModel) {
        for field in CoordinateField::ALL {
            let value = position.coordinate(field);
            self.texts[field.index()] = format_coordinate(value);
            self.synced[field.index()] = value.map(f64::to_bits);
            self.rejected[field.index()] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(button: u16, click_count: u32) -> PointerEvent {
        PointerEvent {
            lng_lat: LngLat::new(20.9, 52.19),
            button,
            click_count,
        }
    }

    #[test]
    fn end_point_gesture_needs_both_conditions() {
        assert!(is_end_point_gesture(&pointer(SECONDARY_BUTTON, 2)));
        assert!(!is_end_point_gesture(&pointer(SECONDARY_BUTTON, 1)));
        assert!(!is_end_point_gesture(&pointer(SECONDARY_BUTTON, 3)));
        assert!(!is_end_point_gesture(&pointer(PRIMARY_BUTTON, 2)));
        assert!(!is_end_point_gesture(&pointer(1, 2)));
    }

    #[test]
    fn double_click_always_targets_start() {
        let event = MapEvent::DoubleClick(pointer(PRIMARY_BUTTON, 2));
        assert_eq!(
            resolve_map_event(&event),
            Some((Endpoint::Start, LngLat::new(20.9, 52.19)))
        );
    }

    #[test]
    fn single_right_click_is_ignored() {
        let event = MapEvent::AuxiliaryClick(pointer(SECONDARY_BUTTON, 1));
        assert_eq!(resolve_map_event(&event), None);
    }

    #[test]
    fn mirror_keeps_partial_edit_after_commit() {
        let mut position = PositionModel::new();
        let mut mirror = FieldMirror::new(&position);
        *mirror.text_mut(CoordinateField::StartLat) = "52.".to_string();
        assert!(mirror.commit(CoordinateField::StartLat, &mut position));
        mirror.sync_from(&position);
        assert_eq!(mirror.text(CoordinateField::StartLat), "52.");
        assert_eq!(position.start().lat, Some(52.0));
    }

    #[test]
    fn mirror_keeps_rejected_text_until_model_changes() {
        let mut position = PositionModel::new();
        let mut mirror = FieldMirror::new(&position);
        *mirror.text_mut(CoordinateField::EndLong) = "abc".to_string();
        assert!(!mirror.commit(CoordinateField::EndLong, &mut position));
        mirror.sync_from(&position);
        assert_eq!(mirror.text(CoordinateField::EndLong), "abc");

        position.update_from_marker_drag(Endpoint::End, LngLat::new(20.5, 52.5));
        mirror.sync_from(&position);
        assert_eq!(mirror.text(CoordinateField::EndLong), "20.5");
        assert_eq!(mirror.text(CoordinateField::EndLat), "52.5");
    }

    #[test]
    fn revert_snaps_rejected_text_back_to_model() {
        let mut position = PositionModel::new();
        position.update_from_map_click(Endpoint::Start, LngLat::new(21.0, 52.1));
        let mut mirror = FieldMirror::new(&position);

        *mirror.text_mut(CoordinateField::StartLat) = "91".to_string();
        assert!(!mirror.commit(CoordinateField::StartLat, &mut position));
        assert!(mirror.is_rejected(CoordinateField::StartLat));

        assert!(mirror.revert(CoordinateField::StartLat, &position));
        assert_eq!(mirror.text(CoordinateField::StartLat), "52.1");
        assert!(!mirror.is_rejected(CoordinateField::StartLat));
        assert!(!mirror.revert(CoordinateField::StartLat, &position));
    }

    #[test]
    fn revert_leaves_accepted_partial_text_alone() {
        let mut position = PositionModel::new();
        let mut mirror = FieldMirror::new(&position);
        *mirror.text_mut(CoordinateField::EndLat) = "52.".to_string();
        assert!(mirror.commit(CoordinateField::EndLat, &mut position));

        mirror.revert_all(&position);
        assert_eq!(mirror.text(CoordinateField::EndLat), "52.");
    }
}
