use route_core::geo::LngLat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// Tile layers drawn under the routes; every other layer is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureClass {
    Water,
    Road,
    Boundary,
}

impl FeatureClass {
    pub(crate) fn from_layer_name(name: &str) -> Option<Self> {
        match name {
            "water" | "waterway" => Some(FeatureClass::Water),
            "transportation" | "road" | "roads" => Some(FeatureClass::Road),
            "boundary" | "boundaries" => Some(FeatureClass::Boundary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileLine {
    pub class: FeatureClass,
    pub points: Vec<LngLat>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileGeometry {
    pub lines: Vec<TileLine>,
}

/// Vector tile endpoint resolved from the map style.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub template: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl TileSource {
    pub fn tile_url(&self, key: TileKey) -> String {
        self.template
            .replace("{z}", &key.z.to_string())
            .replace("{x}", &key.x.to_string())
            .replace("{y}", &key.y.to_string())
    }

    /// Tile zoom for a fractional view zoom, limited to what the source serves.
    pub fn zoom_for(&self, view_zoom: f64) -> u8 {
        let zoom = view_zoom.floor().max(0.0) as u8;
        zoom.clamp(self.min_zoom, self.max_zoom.max(self.min_zoom))
    }
}

pub(crate) struct TileResult {
    pub key: TileKey,
    pub geometry: Result<TileGeometry, String>,
}

pub(crate) enum BaseMapMessage {
    Source(Result<TileSource, String>),
    Tile(TileResult),
}
