use serde_json::json;

use super::*;

fn line_feature_collection() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": [[21.0, 52.2], [21.01, 52.21]]
            },
            "properties": { "seq": 1, "cost_s": 12.5, "length_m": 140.0 }
        }]
    })
}

#[test]
fn single_object_becomes_one_slot_with_metadata() {
    let mut body = line_feature_collection();
    body["metadata"] = json!({
        "total_time_seconds": 3725.0,
        "total_distance_meters": 51234.5,
        "vehicle": "car",
        "max_speed_kmh": 140.0
    });

    let payload = RoutePayload::from_json(body).expect("payload");
    assert_eq!(payload.slots.len(), 1);
    let metadata = payload.slots[0].metadata().expect("metadata");
    assert_eq!(metadata.total_time_seconds, Some(3725.0));
    assert_eq!(metadata.vehicle.as_deref(), Some("car"));
    assert_eq!(metadata.effective_vehicle_speed(), Some(140.0));
    let geometry = payload.slots[0].geometry().expect("geometry");
    assert_eq!(
        geometry.paths.lines,
        vec![vec![LngLat::new(21.0, 52.2), LngLat::new(21.01, 52.21)]]
    );
    assert!(payload.bounding_box.is_none());
}

#[test]
fn array_entries_map_to_ordered_slots() {
    let mut first = line_feature_collection();
    first["metadata"] = json!({ "total_time_seconds": 60, "algorithm": "astar" });
    let body = json!([first, {}, null]);

    let payload = RoutePayload::from_json(body).expect("payload");
    assert_eq!(payload.slots.len(), 3);
    assert!(!payload.slots[0].is_empty());
    assert!(payload.slots[1].is_empty());
    assert!(payload.slots[2].is_empty());
}

#[test]
fn empty_metadata_keeps_geometry_but_has_no_card_data() {
    let mut entry = line_feature_collection();
    entry["metadata"] = json!({});

    let payload = RoutePayload::from_json(json!([entry])).expect("payload");
    assert!(payload.slots[0].geometry().is_some());
    assert!(payload.slots[0].metadata().is_none());
}

#[test]
fn wrapped_object_carries_routes_and_bounding_box() {
    let body = json!({
        "routes": [{ "geometry": { "type": "LineString", "coordinates": [[21.0, 52.0], [21.1, 52.1]] },
                     "metadata": { "total_time_seconds": "42", "criterion": "time" } }],
        "bounding_box": [20.9, 51.9, 21.2, 52.3]
    });

    let payload = RoutePayload::from_json(body).expect("payload");
    let metadata = payload.slots[0].metadata().expect("metadata");
    assert_eq!(metadata.total_time_seconds, Some(42.0));
    assert_eq!(metadata.criterion.as_deref(), Some("time"));
    let bbox = payload.bounding_box.expect("bounding box");
    assert_eq!(bbox.geometry.paths.rings.len(), 1);
    assert_eq!(bbox.geometry.paths.rings[0].len(), 5);
    assert_eq!(bbox.geometry.paths.rings[0][2], LngLat::new(21.2, 52.3));
}

#[test]
fn bounding_box_member_on_single_object_is_not_part_of_the_route() {
    let mut body = line_feature_collection();
    body["metadata"] = json!({ "total_time_seconds": 1 });
    body["bounding_box"] = json!({
        "type": "Polygon",
        "coordinates": [[[20.0, 52.0], [21.0, 52.0], [21.0, 53.0], [20.0, 52.0]]]
    });

    let payload = RoutePayload::from_json(body).expect("payload");
    assert!(payload.bounding_box.is_some());
    let route_paths = &payload.slots[0].geometry().expect("geometry").paths;
    assert!(route_paths.rings.is_empty());
}

#[test]
fn numeric_criterion_is_rendered_as_text() {
    let body = json!({ "geometry": null, "metadata": { "criterion": 2, "vehicle_speed": 90 } });
    let payload = RoutePayload::from_json(body).expect("payload");
    let metadata = payload.slots[0].metadata().expect("metadata");
    assert_eq!(metadata.criterion.as_deref(), Some("2"));
    assert_eq!(metadata.vehicle_speed, Some(90.0));
}

#[test]
fn scalar_body_is_rejected() {
    let err = RoutePayload::from_json(json!("not found")).unwrap_err();
    assert!(matches!(err, PayloadError::UnexpectedShape("string")));
}

#[test]
fn invalid_geojson_becomes_an_empty_slot() {
    let body = json!({ "type": "LineString", "coordinates": "oops" });
    let payload = RoutePayload::from_json(body).expect("payload");
    assert_eq!(payload.slots, vec![RouteSlot::Empty]);
}

#[test]
fn malformed_slot_does_not_discard_its_neighbours() {
    let broken = json!({
        "type": "Feature",
        "geometry": { "type": "LineString", "coordinates": "oops" },
        "properties": {}
    });
    let body = json!([line_feature_collection(), 42, broken]);
    let payload = RoutePayload::from_json(body).expect("payload");

    assert_eq!(payload.slots.len(), 3);
    assert!(payload.slots[0].geometry().is_some());
    assert!(payload.slots[1].is_empty());
    assert!(payload.slots[2].is_empty());
}

#[test]
fn unreadable_bounding_box_is_dropped() {
    let body = json!({
        "routes": [line_feature_collection()],
        "bounding_box": [1.0, "two"]
    });
    let payload = RoutePayload::from_json(body).expect("payload");
    assert!(payload.bounding_box.is_none());
    assert!(payload.slots[0].geometry().is_some());
}

#[test]
fn error_body_without_route_members_is_an_empty_slot() {
    let payload =
        RoutePayload::parse_str(r#"{"error": "no route between the given points"}"#).unwrap();
    assert_eq!(payload.slots, vec![RouteSlot::Empty]);
}

#[test]
fn multi_line_and_collections_are_flattened() {
    let body = json!({
        "type": "GeometryCollection",
        "geometries": [
            { "type": "MultiLineString", "coordinates": [[[0.0, 0.0], [1.0, 1.0]], [[2.0, 2.0], [3.0, 3.0]]] },
            { "type": "Point", "coordinates": [5.0, 5.0] }
        ],
        "metadata": { "total_time_seconds": 5 }
    });
    let payload = RoutePayload::from_json(body).unwrap();
    let paths = &payload.slots[0].geometry().unwrap().paths;
    assert_eq!(paths.lines.len(), 2);
    assert!(paths.rings.is_empty());
}
