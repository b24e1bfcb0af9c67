//! Resolves a map style document to the vector tile endpoint it draws from.

use reqwest::blocking::Client;
use serde_json::Value;

use super::types::TileSource;

const DEFAULT_MAX_ZOOM: u8 = 14;

#[derive(Debug, PartialEq)]
enum SourceRef {
    Inline(TileSource),
    TileJson(String),
}

pub(crate) fn resolve(client: &Client, style_url: &str) -> Result<TileSource, String> {
    let document = get_json(client, style_url)?;
    match source_ref(&document)? {
        SourceRef::Inline(source) => Ok(source),
        SourceRef::TileJson(url) => source_from_tilejson(&get_json(client, &url)?),
    }
}

fn get_json(client: &Client, url: &str) -> Result<Value, String> {
    let response = client.get(url).send().map_err(|err| err.to_string())?;
    if !response.status().is_success() {
        return Err(format!("status {} from {url}", response.status()));
    }
    response.json::<Value>().map_err(|err| err.to_string())
}

/// Accepts a style document (first vector source wins) or a bare TileJSON.
fn source_ref(document: &Value) -> Result<SourceRef, String> {
    let Some(sources) = document.get("sources").and_then(Value::as_object) else {
        return source_from_tilejson(document).map(SourceRef::Inline);
    };
    let source = sources
        .values()
        .find(|source| source.get("type").and_then(Value::as_str) == Some("vector"))
        .ok_or_else(|| "style has no vector source".to_string())?;
    if source.get("tiles").is_some() {
        return source_from_tilejson(source).map(SourceRef::Inline);
    }
    source
        .get("url")
        .and_then(Value::as_str)
        .map(|url| SourceRef::TileJson(url.to_string()))
        .ok_or_else(|| "vector source has neither tiles nor url".to_string())
}

fn source_from_tilejson(document: &Value) -> Result<TileSource, String> {
    let template = document
        .get("tiles")
        .and_then(Value::as_array)
        .and_then(|tiles| tiles.first())
        .and_then(Value::as_str)
        .ok_or_else(|| "no tile URL template".to_string())?;
    let zoom = |key: &str, default: u8| {
        document
            .get(key)
            .and_then(Value::as_u64)
            .map_or(default, |zoom| zoom.min(22) as u8)
    };
    Ok(TileSource {
        template: template.to_string(),
        min_zoom: zoom("minzoom", 0),
        max_zoom: zoom("maxzoom", DEFAULT_MAX_ZOOM),
    })
}
