use route_core::binding::MapView;
use route_core::config::PlannerConfig;
use route_core::geo::{LngLat, MarkerId};
use route_core::planner::RoutePlanner;

mod base_map;
mod viewport;

pub use base_map::{BaseMap, FeatureClass};
pub use viewport::MapViewport;

/// A marker being dragged; the model is only updated on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerDrag {
    pub marker: MarkerId,
    pub lng_lat: LngLat,
}

pub struct PlannerApp {
    pub planner: RoutePlanner,
    pub viewport: MapViewport,
    pub marker_drag: Option<MarkerDrag>,
    pub initial_view: MapView,
    pub base_map: BaseMap,
    pub backend_url: String,
}

impl PlannerApp {
    pub fn new(planner: RoutePlanner, config: &PlannerConfig, backend_url: String) -> Self {
        Self {
            planner,
            viewport: config.initial_view.into(),
            marker_drag: None,
            initial_view: config.initial_view,
            base_map: BaseMap::new(&config.style_url),
            backend_url,
        }
    }

    pub fn reset_view(&mut self) {
        self.viewport = self.initial_view.into();
    }
}
