use reqwest::blocking::Client;

use route_core::geo::LngLat;

use super::types::{FeatureClass, TileGeometry, TileKey, TileLine, TileResult};

const DEFAULT_EXTENT: f64 = 4096.0;

pub(crate) fn fetch_tile(client: &Client, url: &str, key: TileKey) -> TileResult {
    let geometry = fetch_bytes(client, url).and_then(|bytes| decode_tile_geometry(key, &bytes));
    TileResult { key, geometry }
}

fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, String> {
    let response = client.get(url).send().map_err(|err| err.to_string())?;
    if !response.status().is_success() {
        return Err(format!("status {}", response.status()));
    }
    let bytes = response.bytes().map_err(|err| err.to_string())?;
    Ok(bytes.to_vec())
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct VectorTile {
    #[prost(message, repeated, tag = "3")]
    pub layers: Vec<VectorTileLayer>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct VectorTileLayer {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(message, repeated, tag = "2")]
    pub features: Vec<VectorTileFeature>,
    #[prost(uint32, tag = "5")]
    pub extent: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
struct VectorTileFeature {
    #[prost(enumeration = "GeomType", tag = "3")]
    pub r#type: i32,
    #[prost(uint32, repeated, packed = "true", tag = "4")]
    pub geometry: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ::prost::Enumeration)]
#[repr(i32)]
enum GeomType {
    Unknown = 0,
    Point = 1,
    Linestring = 2,
    Polygon = 3,
}

/// Lines and polygon outlines from the layers the base map draws.
fn decode_tile_geometry(key: TileKey, data: &[u8]) -> Result<TileGeometry, String> {
    use prost::Message;

    let tile = VectorTile::decode(data).map_err(|err| err.to_string())?;
    let mut lines = Vec::new();
    for layer in &tile.layers {
        let Some(class) = FeatureClass::from_layer_name(&layer.name) else {
            continue;
        };
        let extent = if layer.extent == 0 {
            DEFAULT_EXTENT
        } else {
            layer.extent as f64
        };
        for feature in &layer.features {
            if feature.r#type != GeomType::Linestring as i32
                && feature.r#type != GeomType::Polygon as i32
            {
                continue;
            }
            for path in decode_paths(&feature.geometry) {
                let points = path
                    .into_iter()
                    .map(|(x, y)| tile_point_to_lng_lat(key, x as f64, y as f64, extent))
                    .collect();
                lines.push(TileLine { class, points });
            }
        }
    }
    Ok(TileGeometry { lines })
}

/// Decodes MoveTo/LineTo/ClosePath commands into paths. Closed rings repeat
/// their first point.
fn decode_paths(geometry: &[u32]) -> Vec<Vec<(i32, i32)>> {
    let mut paths: Vec<Vec<(i32, i32)>> = Vec::new();
    let mut cursor = 0usize;
    let mut x = 0i32;
    let mut y = 0i32;
    while cursor < geometry.len() {
        let command = geometry[cursor];
        cursor += 1;
        let id = command & 0x7;
        let count = command >> 3;
        match id {
            1 | 2 => {
                for _ in 0..count {
                    if cursor + 1 >= geometry.len() {
                        break;
                    }
                    x += decode_zigzag(geometry[cursor]);
                    y += decode_zigzag(geometry[cursor + 1]);
                    cursor += 2;
                    match (id, paths.last_mut()) {
                        (2, Some(current)) => current.push((x, y)),
                        _ => paths.push(vec![(x, y)]),
                    }
                }
            }
            7 => {
                if let Some(current) = paths.last_mut() {
                    if let Some(&first) = current.first() {
                        current.push(first);
                    }
                }
            }
            _ => break,
        }
    }
    paths.retain(|path| path.len() >= 2);
    paths
}

fn decode_zigzag(value: u32) -> i32 {
    ((value >> 1) as i32) ^ (-((value & 1) as i32))
}

fn tile_point_to_lng_lat(key: TileKey, x: f64, y: f64, extent: f64) -> LngLat {
    let n = (1u64 << key.z) as f64;
    let gx = (key.x as f64 + (x / extent)) / n;
    let gy = (key.y as f64 + (y / extent)) / n;
    let lng = gx * 360.0 - 180.0;
    let lat = (std::f64::consts::PI * (1.0 - 2.0 * gy))
        .sinh()
        .atan()
        .to_degrees();
    LngLat::new(lng, lat)
}
