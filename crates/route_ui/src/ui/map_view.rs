//! Map canvas: draws the scene from the planner and turns pointer input into
//! map events.

use eframe::egui::{self, Color32, PointerButton, Pos2, Rect, Stroke};

use route_core::binding::{
    MapEvent, MapScene, Paint, PointerEvent, PRIMARY_BUTTON, SECONDARY_BUTTON,
};
use route_core::geo::{LngLat, MarkerId};
use route_core::payload::MapGeometry;

use crate::app::{FeatureClass, MapViewport, MarkerDrag, PlannerApp};
use crate::ui::utils::{opaque, style_color};

const MARKER_RADIUS: f32 = 8.0;
const MARKER_HIT_RADIUS: f32 = 14.0;
const SCROLL_ZOOM_STEP: f64 = 1.0 / 120.0;

pub fn render_map(ui: &mut egui::Ui, app: &mut PlannerApp) {
    let (rect, response) =
        ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 0.0, Color32::from_gray(236));
    draw_graticule(&painter, &app.viewport, rect);
    draw_base_map(&painter, app, rect);

    handle_zoom(ui, &response, app, rect);
    handle_drag(&response, app, rect);
    handle_clicks(ui, &response, app, rect);

    let scene = app.planner.scene();
    draw_layers(&painter, &app.viewport, rect, &scene);
    draw_markers(&painter, &app.viewport, rect, &scene, app.marker_drag);

    painter.rect_stroke(
        rect,
        0.0,
        Stroke::new(1.0, Color32::from_gray(160)),
        egui::StrokeKind::Inside,
    );
    painter.text(
        rect.right_bottom() - egui::vec2(6.0, 4.0),
        egui::Align2::RIGHT_BOTTOM,
        format!("zoom {:.1} · {}", app.viewport.zoom, app.base_map.status_label()),
        egui::FontId::proportional(11.0),
        Color32::from_gray(90),
    );
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut PlannerApp, rect: Rect) {
    let Some(hover) = response.hover_pos() else {
        return;
    };
    let scroll = ui.input(|input| input.smooth_scroll_delta.y);
    if scroll != 0.0 {
        app.viewport.zoom_at(hover, rect, scroll as f64 * SCROLL_ZOOM_STEP);
    }
}

/// Primary drag either moves a marker (when it starts on one) or pans.
fn handle_drag(response: &egui::Response, app: &mut PlannerApp, rect: Rect) {
    if response.drag_started_by(PointerButton::Primary) {
        if let Some(origin) = response.interact_pointer_pos() {
            let scene = app.planner.scene();
            app.marker_drag = marker_at(&scene, &app.viewport, rect, origin).map(|marker| {
                MarkerDrag {
                    marker,
                    lng_lat: app.viewport.unproject(origin, rect),
                }
            });
        }
    }

    if response.dragged_by(PointerButton::Primary) {
        match app.marker_drag.as_mut() {
            Some(drag) => {
                if let Some(pos) = response.interact_pointer_pos() {
                    drag.lng_lat = app.viewport.unproject(pos, rect);
                }
            }
            None => app.viewport.pan_by(response.drag_delta()),
        }
    }

    if response.drag_stopped() {
        if let Some(drag) = app.marker_drag.take() {
            app.planner.handle_map_event(&MapEvent::MarkerDragEnd {
                marker: drag.marker,
                lng_lat: drag.lng_lat,
            });
        }
    }
}

fn handle_clicks(ui: &egui::Ui, response: &egui::Response, app: &mut PlannerApp, rect: Rect) {
    let Some(pos) = response.interact_pointer_pos().or(response.hover_pos()) else {
        return;
    };
    let lng_lat = app.viewport.unproject(pos, rect);

    if response.double_clicked_by(PointerButton::Primary) {
        app.planner.handle_map_event(&MapEvent::DoubleClick(PointerEvent {
            lng_lat,
            button: PRIMARY_BUTTON,
            click_count: 2,
        }));
    }

    for (button, index) in [
        (PointerButton::Secondary, SECONDARY_BUTTON),
        (PointerButton::Middle, 1),
    ] {
        if !response.clicked_by(button) {
            continue;
        }
        let click_count = if ui.input(|input| input.pointer.button_double_clicked(button)) {
            2
        } else {
            1
        };
        app.planner.handle_map_event(&MapEvent::AuxiliaryClick(PointerEvent {
            lng_lat,
            button: index,
            click_count,
        }));
    }
}

fn marker_at(
    scene: &MapScene<'_>,
    viewport: &MapViewport,
    rect: Rect,
    pos: Pos2,
) -> Option<MarkerId> {
    scene
        .markers
        .iter()
        .filter(|marker| marker.draggable)
        .map(|marker| (marker.id, viewport.project(marker.lng_lat, rect).distance(pos)))
        .filter(|(_, distance)| *distance <= MARKER_HIT_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

fn project_path(viewport: &MapViewport, rect: Rect, path: &[LngLat]) -> Vec<Pos2> {
    path.iter()
        .map(|point| viewport.project(*point, rect))
        .collect()
}

fn draw_base_map(painter: &egui::Painter, app: &mut PlannerApp, rect: Rect) {
    let keys = app.base_map.request_visible(&app.viewport, rect);
    for key in keys {
        let Some(tile) = app.base_map.tile(&key) else {
            continue;
        };
        for line in &tile.lines {
            let points = project_path(&app.viewport, rect, &line.points);
            if points.len() >= 2 {
                painter.add(egui::Shape::line(points, base_map_stroke(line.class)));
            }
        }
    }
}

fn base_map_stroke(class: FeatureClass) -> Stroke {
    match class {
        FeatureClass::Water => Stroke::new(1.5, Color32::from_rgb(150, 190, 228)),
        FeatureClass::Road => Stroke::new(1.0, Color32::from_gray(178)),
        FeatureClass::Boundary => Stroke::new(1.0, Color32::from_rgb(176, 146, 196)),
    }
}

fn draw_layers(
    painter: &egui::Painter,
    viewport: &MapViewport,
    rect: Rect,
    scene: &MapScene<'_>,
) {
    for layer in &scene.layers {
        match layer.paint {
            Paint::Fill {
                color,
                outline_color,
                opacity,
            } => {
                let fill = style_color(color, opacity);
                let outline = Stroke::new(1.0, opaque(outline_color));
                draw_fill(painter, viewport, rect, layer.geometry, fill, outline);
            }
            Paint::Line {
                color,
                width,
                opacity,
            } => {
                if opacity <= 0.0 {
                    continue;
                }
                let stroke = Stroke::new(width, style_color(color, opacity));
                for line in &layer.geometry.paths.lines {
                    let points = project_path(viewport, rect, line);
                    if points.len() >= 2 {
                        painter.add(egui::Shape::line(points, stroke));
                    }
                }
            }
        }
    }
}

fn draw_fill(
    painter: &egui::Painter,
    viewport: &MapViewport,
    rect: Rect,
    geometry: &MapGeometry,
    fill: Color32,
    outline: Stroke,
) {
    for ring in &geometry.paths.rings {
        let mut points = project_path(viewport, rect, ring);
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            continue;
        }
        if is_convex(&points) {
            painter.add(egui::Shape::convex_polygon(points, fill, outline));
        } else {
            painter.add(egui::Shape::closed_line(points, outline));
        }
    }
}

/// Whether a ring turns the same way at every vertex. Collinear vertices are
/// ignored.
fn is_convex(points: &[Pos2]) -> bool {
    let n = points.len();
    let mut sign = 0.0f32;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        let cross = (b - a).x * (c - b).y - (b - a).y * (c - b).x;
        if cross.abs() <= f32::EPSILON {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

fn draw_markers(
    painter: &egui::Painter,
    viewport: &MapViewport,
    rect: Rect,
    scene: &MapScene<'_>,
    drag: Option<MarkerDrag>,
) {
    for marker in &scene.markers {
        let lng_lat = match drag {
            Some(drag) if drag.marker == marker.id => drag.lng_lat,
            _ => marker.lng_lat,
        };
        let center = viewport.project(lng_lat, rect);
        painter.circle(
            center,
            MARKER_RADIUS,
            opaque(marker.color),
            Stroke::new(2.0, Color32::WHITE),
        );
    }
}

/// Light lon/lat reference grid.
fn draw_graticule(painter: &egui::Painter, viewport: &MapViewport, rect: Rect) {
    let top_left = viewport.unproject(rect.left_top(), rect);
    let bottom_right = viewport.unproject(rect.right_bottom(), rect);
    let span = (bottom_right.lng - top_left.lng).abs().max(1e-6);
    let step = graticule_step(span);
    let stroke = Stroke::new(1.0, Color32::from_gray(220));

    let mut lng = (top_left.lng / step).floor() * step;
    while lng <= bottom_right.lng {
        let x = viewport.project(LngLat::new(lng, viewport.center.lat), rect).x;
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            stroke,
        );
        lng += step;
    }
    let mut lat = (bottom_right.lat / step).floor() * step;
    while lat <= top_left.lat {
        let y = viewport.project(LngLat::new(viewport.center.lng, lat), rect).y;
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            stroke,
        );
        lat += step;
    }
}

fn graticule_step(span_degrees: f64) -> f64 {
    const STEPS: [f64; 9] = [0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0];
    STEPS
        .into_iter()
        .find(|step| span_degrees / step <= 12.0)
        .unwrap_or(30.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graticule_step_keeps_line_count_small() {
        assert_eq!(graticule_step(0.05), 0.005);
        assert_eq!(graticule_step(1.0), 0.1);
        assert_eq!(graticule_step(360.0), 30.0);
    }

    #[test]
    fn convexity_check_rejects_notched_rings() {
        let square = [
            egui::pos2(0.0, 0.0),
            egui::pos2(10.0, 0.0),
            egui::pos2(10.0, 10.0),
            egui::pos2(0.0, 10.0),
        ];
        assert!(is_convex(&square));

        let notched = [
            egui::pos2(0.0, 0.0),
            egui::pos2(10.0, 0.0),
            egui::pos2(5.0, 3.0),
            egui::pos2(10.0, 10.0),
            egui::pos2(0.0, 10.0),
        ];
        assert!(!is_convex(&notched));
    }
}
