use route_core::binding::build_scene;
use route_core::geo::{CoordinateField, Endpoint, GeoPoint, LngLat, MarkerId};
use route_core::position::PositionModel;
use route_core::presentation::PresentationState;

fn model_with_start() -> PositionModel {
    let mut model = PositionModel::new();
    model.update_from_map_click(Endpoint::Start, LngLat::new(21.0, 52.2));
    model
}

#[test]
fn non_numeric_field_edit_keeps_coordinate() {
    let mut model = model_with_start();
    for raw in ["", "abc", "52,3", "--1", "NaN", "inf"] {
        assert!(!model.update_from_field(CoordinateField::StartLat, raw), "{raw}");
        assert_eq!(model.start().lat, Some(52.2));
    }
}

#[test]
fn out_of_range_field_edit_keeps_coordinate() {
    let mut model = model_with_start();
    assert!(!model.update_from_field(CoordinateField::StartLat, "90.0001"));
    assert!(!model.update_from_field(CoordinateField::StartLat, "-91"));
    assert!(!model.update_from_field(CoordinateField::StartLong, "180.5"));
    assert!(!model.update_from_field(CoordinateField::StartLong, "-181"));
    assert_eq!(model.start(), &GeoPoint::new(52.2, 21.0));
}

#[test]
fn boundary_values_are_accepted() {
    let mut model = PositionModel::new();
    assert!(model.update_from_field(CoordinateField::EndLat, "-90"));
    assert!(model.update_from_field(CoordinateField::EndLong, " 180 "));
    assert_eq!(model.end(), &GeoPoint::new(-90.0, 180.0));
}

#[test]
fn accepted_edit_changes_only_that_coordinate() {
    let mut model = model_with_start();
    model.update_from_map_click(Endpoint::End, LngLat::new(20.9, 52.25));
    let end_before = *model.end();

    assert!(model.update_from_field(CoordinateField::StartLong, "21.05"));
    assert_eq!(model.start(), &GeoPoint::new(52.2, 21.05));
    assert_eq!(model.end(), &end_before);
}

#[test]
fn marker_drag_sets_both_coordinates_of_one_endpoint() {
    let mut model = PositionModel::new();
    model.update_from_map_click(Endpoint::End, LngLat::new(20.9, 52.25));
    let end_before = *model.end();

    model.update_from_marker_drag(Endpoint::Start, LngLat::new(21.0, 52.2));
    assert_eq!(model.start().lat, Some(52.2));
    assert_eq!(model.start().lng, Some(21.0));
    assert_eq!(model.end(), &end_before);
}

#[test]
fn field_value_reaches_marker_bit_identical() {
    let mut model = PositionModel::new();
    assert!(model.update_from_field(CoordinateField::StartLat, "52.231958123456789"));
    assert!(model.update_from_field(CoordinateField::StartLong, "21.006725"));

    let typed: f64 = "52.231958123456789".parse().unwrap();
    let presentation = PresentationState::new();
    let scene = build_scene(&model, &presentation);
    let marker = scene.marker(MarkerId::Start).expect("start marker");
    assert_eq!(marker.lng_lat.lat.to_bits(), typed.to_bits());
    assert_eq!(marker.lng_lat.lng.to_bits(), 21.006725_f64.to_bits());
}

#[test]
fn partially_set_endpoint_has_no_marker() {
    let mut model = PositionModel::new();
    assert!(model.update_from_field(CoordinateField::EndLat, "52.0"));
    let presentation = PresentationState::new();
    let scene = build_scene(&model, &presentation);
    assert!(scene.marker(MarkerId::End).is_none());
    assert!(scene.markers.is_empty());
}

#[test]
fn swap_and_reset_are_explicit_actions() {
    let mut model = model_with_start();
    model.swap_endpoints();
    assert!(model.start().is_unset());
    assert_eq!(model.end(), &GeoPoint::new(52.2, 21.0));

    model.reset(Endpoint::End);
    assert!(model.end().is_unset());
}
