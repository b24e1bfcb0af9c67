mod support;

use std::sync::Arc;

use route_core::geo::CoordinateField;
use route_core::test_helpers::{multi_route_body, single_route_body, StaticBackend};
use serde_json::json;
use support::{filled_slots, planner_with, planner_with_endpoints, GatedBackend, WAIT};

#[test]
fn later_arriving_response_wins_even_if_submitted_first() {
    let backend = GatedBackend::new();
    let mut planner = planner_with_endpoints(backend.clone());

    planner.set_speed_text("50");
    let first = planner.submit();
    planner.set_speed_text("60");
    let second = planner.submit();
    assert_eq!(planner.pending_requests(), 2);

    backend.release("60", Ok(multi_route_body(3)));
    assert_eq!(planner.wait_for_response(WAIT), Some(second));
    assert_eq!(filled_slots(&planner), vec![0, 1, 2]);

    backend.release("50", Ok(multi_route_body(1)));
    assert_eq!(planner.wait_for_response(WAIT), Some(first));
    assert_eq!(filled_slots(&planner), vec![0]);
    assert_eq!(planner.last_applied_sequence(), Some(first.sequence));
    assert_eq!(planner.pending_requests(), 0);
}

#[test]
fn failure_between_successes_changes_nothing() {
    let backend = GatedBackend::new();
    let mut planner = planner_with_endpoints(backend.clone());

    planner.set_speed_text("70");
    let ok = planner.submit();
    backend.release("70", Ok(multi_route_body(2)));
    assert_eq!(planner.wait_for_response(WAIT), Some(ok));
    let before = planner.presentation().clone();

    planner.set_speed_text("71");
    planner.submit();
    backend.release("71", Err(502));
    planner.wait_for_response(WAIT);

    planner.set_speed_text("72");
    planner.submit();
    backend.release("72", Ok(json!("not a route")));
    planner.wait_for_response(WAIT);

    assert_eq!(planner.presentation(), &before);
    assert_eq!(planner.last_applied_sequence(), Some(ok.sequence));
}

#[test]
fn separate_bounding_box_endpoint_is_applied() {
    let backend = Arc::new(
        StaticBackend::new(single_route_body()).with_bounding_box(json!({
            "type": "Polygon",
            "coordinates": [[[20.9, 52.1], [21.1, 52.1], [21.1, 52.3], [20.9, 52.3], [20.9, 52.1]]]
        })),
    );
    let mut planner = planner_with(backend);
    planner.submit();
    planner.wait_for_response(WAIT);

    assert_eq!(filled_slots(&planner), vec![0]);
    let bounding_box = planner.presentation().bounding_box().expect("bbox applied");
    assert_eq!(bounding_box.geometry.paths.rings[0].len(), 5);
}

#[test]
fn submit_does_not_require_endpoints() {
    let backend = Arc::new(StaticBackend::failing(400));
    let mut planner = planner_with(backend.clone());
    planner.submit();
    planner.wait_for_response(WAIT);

    let queries = backend.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].start_lat, "");
    assert!(filled_slots(&planner).is_empty());
}

#[test]
fn field_edits_flow_into_the_next_request() {
    let backend = Arc::new(StaticBackend::new(multi_route_body(1)));
    let mut planner = planner_with(backend.clone());
    planner.field_text_mut(CoordinateField::StartLat).push_str("52.2");
    assert!(planner.commit_field(CoordinateField::StartLat));
    assert!(planner.update_from_field(CoordinateField::StartLong, "21"));
    planner.submit();
    planner.wait_for_response(WAIT);

    let query = &backend.queries()[0];
    assert_eq!(query.start_lat, "52.2");
    assert_eq!(query.start_lon, "21");
    assert_eq!(planner.detail_cards().len(), 1);
}
