use super::*;
use crate::geo::{Endpoint, LngLat};
use crate::position::PositionModel;
use crate::request::Algorithm;
use crate::transport::TransportState;

fn query() -> RouteQuery {
    let mut position = PositionModel::new();
    position.update_from_map_click(Endpoint::Start, LngLat::new(21.006725, 52.231958));
    RouteQuery::from_form(&position, &TransportState::default(), Algorithm::Dijkstra)
}

#[test]
fn endpoint_url_joins_with_single_slash() {
    let url = endpoint_url("http://127.0.0.1:8000/", "/api/get_path/").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/get_path/");
    let url = endpoint_url("https://routing.example.org/v1", "api/get_path/").unwrap();
    assert_eq!(url.as_str(), "https://routing.example.org/v1/api/get_path/");
}

#[test]
fn endpoint_url_rejects_garbage() {
    assert!(matches!(
        endpoint_url("not a url", "api/get_path/"),
        Err(BackendError::Url(_))
    ));
}

#[test]
fn query_string_keeps_wire_order_and_empty_values() {
    let base = endpoint_url("http://127.0.0.1:8000/", "api/get_path/").unwrap();
    let url = with_query(&base, &query());
    assert_eq!(
        url.query(),
        Some(
            "start_lat=52.231958&start_lon=21.006725&end_lat=&end_lon=\
             &vehicle_speed=140&algorithm=djikstra"
        )
    );
}

#[test]
fn backend_builds_optional_boundaries_url() {
    let mut config = PlannerConfig::default();
    let backend = HttpRouteBackend::new(&config).unwrap();
    assert!(backend.boundaries_url.is_none());
    assert_eq!(
        backend.route_url().as_str(),
        "http://127.0.0.1:8000/api/get_path/"
    );

    config.boundaries_path = Some("api/get_boundaries/".to_string());
    let backend = HttpRouteBackend::new(&config).unwrap();
    assert_eq!(
        backend.boundaries_url.as_ref().map(Url::as_str),
        Some("http://127.0.0.1:8000/api/get_boundaries/")
    );
}

#[test]
fn unreachable_backend_reports_http_error() {
    let config = PlannerConfig {
        base_url: "http://127.0.0.1:9/".to_string(),
        request_timeout_secs: Some(2),
        ..PlannerConfig::default()
    };
    let backend = HttpRouteBackend::new(&config).unwrap();
    assert!(matches!(
        backend.fetch_route(&query()),
        Err(BackendError::Http(_))
    ));
}
