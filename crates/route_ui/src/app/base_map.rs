//! Vector tile base map: resolves the configured style once, then fetches
//! visible tiles on worker threads and drains them each frame.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use eframe::egui;
use reqwest::blocking::Client;

mod fetch_decode;
mod style_source;
mod types;

use types::{BaseMapMessage, TileResult};
pub use types::{FeatureClass, TileGeometry, TileKey, TileSource};

use super::viewport::{mercator, MapViewport};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_VISIBLE_TILES: usize = 64;
const MAX_CACHED_TILES: usize = 256;

enum SourceState {
    Resolving,
    Ready(TileSource),
    Unavailable,
}

pub struct BaseMap {
    client: Option<Client>,
    source: SourceState,
    tiles: HashMap<TileKey, TileGeometry>,
    inflight: HashSet<TileKey>,
    errors: HashMap<TileKey, String>,
    sender: Sender<BaseMapMessage>,
    receiver: Receiver<BaseMapMessage>,
    zoom: Option<u8>,
}

impl BaseMap {
    /// Starts resolving `style_url` in the background.
    pub fn new(style_url: &str) -> Self {
        let client = match Client::builder().timeout(REQUEST_TIMEOUT).build() {
            Ok(client) => client,
            Err(err) => {
                log::warn!("base map disabled, no HTTP client: {err}");
                return Self::with_state(None, SourceState::Unavailable);
            }
        };
        let map = Self::with_state(Some(client.clone()), SourceState::Resolving);
        let sender = map.sender.clone();
        let style_url = style_url.to_string();
        std::thread::spawn(move || {
            let source = style_source::resolve(&client, &style_url);
            let _ = sender.send(BaseMapMessage::Source(source));
        });
        map
    }

    fn with_state(client: Option<Client>, source: SourceState) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel();
        Self {
            client,
            source,
            tiles: HashMap::new(),
            inflight: HashSet::new(),
            errors: HashMap::new(),
            sender,
            receiver,
            zoom: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.source, SourceState::Resolving) || !self.inflight.is_empty()
    }

    pub fn status_label(&self) -> &'static str {
        match self.source {
            SourceState::Resolving => "loading base map",
            SourceState::Ready(_) => "base map © OpenStreetMap contributors",
            SourceState::Unavailable => "base map unavailable",
        }
    }

    pub fn drain_results(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            match message {
                BaseMapMessage::Source(Ok(source)) => {
                    log::info!("base map tiles from {}", source.template);
                    self.source = SourceState::Ready(source);
                }
                BaseMapMessage::Source(Err(err)) => {
                    log::warn!("base map unavailable: {err}");
                    self.source = SourceState::Unavailable;
                }
                BaseMapMessage::Tile(result) => self.apply_tile(result),
            }
        }
    }

    fn apply_tile(&mut self, result: TileResult) {
        self.inflight.remove(&result.key);
        if self.zoom != Some(result.key.z) {
            return;
        }
        match result.geometry {
            Ok(geometry) => {
                self.tiles.insert(result.key, geometry);
            }
            Err(err) => {
                log::debug!("tile {:?} failed: {err}", result.key);
                self.errors.insert(result.key, err);
            }
        }
    }

    /// Tiles covering `rect`, nearest to the center first. Missing ones are
    /// requested; loaded ones are available through [`Self::tile`].
    pub fn request_visible(&mut self, viewport: &MapViewport, rect: egui::Rect) -> Vec<TileKey> {
        let SourceState::Ready(source) = &self.source else {
            return Vec::new();
        };
        let source = source.clone();
        let z = source.zoom_for(viewport.zoom);
        let keys = visible_tiles(viewport, rect, z);

        if self.zoom != Some(z) {
            self.tiles.clear();
            self.errors.clear();
            self.zoom = Some(z);
        }
        if self.tiles.len() > MAX_CACHED_TILES {
            self.tiles.retain(|key, _| keys.contains(key));
        }

        let Some(client) = &self.client else {
            return keys;
        };
        for key in self.missing_tiles(&keys) {
            self.inflight.insert(key);
            let client = client.clone();
            let sender = self.sender.clone();
            let url = source.tile_url(key);
            std::thread::spawn(move || {
                let result = fetch_decode::fetch_tile(&client, &url, key);
                let _ = sender.send(BaseMapMessage::Tile(result));
            });
        }
        keys
    }

    /// Keys to fetch next: not loaded, not in flight, not failed, within the
    /// in-flight limit.
    fn missing_tiles(&self, keys: &[TileKey]) -> Vec<TileKey> {
        let budget = inflight_limit(self.tiles.len()).saturating_sub(self.inflight.len());
        keys.iter()
            .filter(|key| {
                !self.tiles.contains_key(key)
                    && !self.inflight.contains(key)
                    && !self.errors.contains_key(key)
            })
            .take(budget)
            .copied()
            .collect()
    }

    pub fn tile(&self, key: &TileKey) -> Option<&TileGeometry> {
        self.tiles.get(key)
    }
}

fn inflight_limit(tile_count: usize) -> usize {
    const WARMUP_TILES: usize = 6;
    const WARMUP_LIMIT: usize = 4;
    const MAX_LIMIT: usize = 12;
    if tile_count >= WARMUP_TILES {
        MAX_LIMIT
    } else {
        WARMUP_LIMIT
    }
}

fn visible_tiles(viewport: &MapViewport, rect: egui::Rect, z: u8) -> Vec<TileKey> {
    let n = 1u32 << z;
    let to_tile = |pos: egui::Pos2| {
        let (x, y) = mercator(viewport.unproject(pos, rect));
        let clamp = |v: f64| (v * n as f64).floor().clamp(0.0, (n - 1) as f64) as u32;
        (clamp(x), clamp(y))
    };
    let (x_min, y_min) = to_tile(rect.left_top());
    let (x_max, y_max) = to_tile(rect.right_bottom());
    let (cx, cy) = to_tile(rect.center());

    let mut keys: Vec<TileKey> = (x_min..=x_max)
        .flat_map(|x| (y_min..=y_max).map(move |y| TileKey { z, x, y }))
        .collect();
    keys.sort_by_key(|key| key.x.abs_diff(cx).max(key.y.abs_diff(cy)));
    keys.truncate(MAX_VISIBLE_TILES);
    keys
}
