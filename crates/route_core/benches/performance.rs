//! Performance benchmarks for route_core using Criterion.rs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use route_core::binding::build_scene;
use route_core::geo::{Endpoint, LngLat};
use route_core::payload::RoutePayload;
use route_core::position::PositionModel;
use route_core::presentation::PresentationState;
use route_core::test_helpers::{multi_route_body, wrapped_route_body};
use serde_json::{json, Value};

/// A route body whose line strings have `points` vertices each.
fn long_route_body(points: usize) -> Value {
    let coordinates: Vec<Value> = (0..points)
        .map(|i| {
            let t = i as f64 / points as f64;
            json!([21.0 + t * 0.2, 52.2 + (t * 12.0).sin() * 0.01])
        })
        .collect();
    let mut body = multi_route_body(3);
    if let Value::Array(routes) = &mut body {
        for route in routes {
            route["geometry"]["coordinates"] = Value::Array(coordinates.clone());
        }
    }
    body
}

fn bench_payload_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_parsing");
    for points in [100, 1_000, 10_000] {
        let text = long_route_body(points).to_string();
        group.bench_with_input(BenchmarkId::from_parameter(points), &text, |b, text| {
            b.iter(|| black_box(RoutePayload::parse_str(text)));
        });
    }
    group.finish();
}

fn bench_scene_derivation(c: &mut Criterion) {
    let mut position = PositionModel::new();
    position.update_from_map_click(Endpoint::Start, LngLat::new(21.006725, 52.231958));
    position.update_from_map_click(Endpoint::End, LngLat::new(20.9851, 52.2297));

    let mut presentation = PresentationState::new();
    if let Ok(payload) = RoutePayload::from_json(wrapped_route_body(3)) {
        presentation.apply_route_response(payload);
    }
    presentation.toggle_visibility(1);

    c.bench_function("scene_derivation", |b| {
        b.iter(|| black_box(build_scene(&position, &presentation).layers.len()));
    });
    c.bench_function("detail_cards", |b| {
        b.iter(|| black_box(presentation.detail_cards()));
    });
}

criterion_group!(benches, bench_payload_parsing, bench_scene_derivation);
criterion_main!(benches);
