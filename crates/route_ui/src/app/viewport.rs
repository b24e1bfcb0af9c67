//! Web Mercator camera for the map canvas.

use eframe::egui;

use route_core::binding::MapView;
use route_core::geo::LngLat;

const TILE_SIZE: f64 = 256.0;
const MAX_LATITUDE: f64 = 85.05112878;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 19.0;

fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
}

/// Normalized Mercator x in `0..1`.
fn lon_to_x(lon: f64) -> f64 {
    (lon + 180.0) / 360.0
}

/// Normalized Mercator y in `0..1`, north at 0.
fn lat_to_y(lat: f64) -> f64 {
    let lat = clamp_lat(lat).to_radians();
    (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) * 0.5
}

fn x_to_lon(x: f64) -> f64 {
    x * 360.0 - 180.0
}

fn y_to_lat(y: f64) -> f64 {
    let n = std::f64::consts::PI * (1.0 - 2.0 * y);
    n.sinh().atan().to_degrees()
}

/// Normalized Mercator position of a point, `(0, 0)` at the north-west corner.
pub fn mercator(point: LngLat) -> (f64, f64) {
    (lon_to_x(point.lng), lat_to_y(point.lat))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: LngLat,
    pub zoom: f64,
}

impl From<MapView> for MapViewport {
    fn from(view: MapView) -> Self {
        Self {
            center: LngLat::new(view.longitude, view.latitude),
            zoom: view.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }
}

impl MapViewport {
    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Screen position of a geographic point. Points off the visible rect
    /// still project, so lines crossing the edge are drawn and clipped.
    pub fn project(&self, point: LngLat, rect: egui::Rect) -> egui::Pos2 {
        let size = self.world_size();
        let dx = (lon_to_x(point.lng) - lon_to_x(self.center.lng)) * size;
        let dy = (lat_to_y(point.lat) - lat_to_y(self.center.lat)) * size;
        rect.center() + egui::vec2(dx as f32, dy as f32)
    }

    pub fn unproject(&self, pos: egui::Pos2, rect: egui::Rect) -> LngLat {
        let size = self.world_size();
        let offset = pos - rect.center();
        let x = lon_to_x(self.center.lng) + offset.x as f64 / size;
        let y = lat_to_y(self.center.lat) + offset.y as f64 / size;
        LngLat::new(x_to_lon(x), y_to_lat(y.clamp(0.0, 1.0)))
    }

    /// Move the map with the pointer by a screen-space delta.
    pub fn pan_by(&mut self, delta: egui::Vec2) {
        let size = self.world_size();
        let x = lon_to_x(self.center.lng) - delta.x as f64 / size;
        let y = lat_to_y(self.center.lat) - delta.y as f64 / size;
        self.center = LngLat::new(
            x_to_lon(x.rem_euclid(1.0)),
            clamp_lat(y_to_lat(y.clamp(0.0, 1.0))),
        );
    }

    /// Change zoom by `steps` levels, keeping the point under `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: egui::Pos2, rect: egui::Rect, steps: f64) {
        let fixed = self.unproject(anchor, rect);
        self.zoom = (self.zoom + steps).clamp(MIN_ZOOM, MAX_ZOOM);
        let drift = self.project(fixed, rect) - anchor;
        self.pan_by(-drift);
    }
}
