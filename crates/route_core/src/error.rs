use std::path::PathBuf;

/// Errors from talking to the routing backend.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[cfg(feature = "http")]
    #[error("routing backend request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[cfg(feature = "http")]
    #[error("routing backend returned an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("routing backend answered with status {0}")]
    Status(u16),
    #[error("invalid routing backend URL '{0}'")]
    Url(String),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// A JSON body that does not have the shape of a route or bounding-box payload.
#[derive(thiserror::Error, Debug)]
pub enum PayloadError {
    #[error("expected a route object or an array of route objects, found {0}")]
    UnexpectedShape(&'static str),
    #[error("invalid GeoJSON in {context}: {source}")]
    Geometry {
        context: String,
        #[source]
        source: Box<geojson::Error>,
    },
    #[error("route payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid base URL '{0}': expected an http:// or https:// address")]
    InvalidUrl(String),
    #[error("invalid initial view: {0}")]
    InvalidView(String),
}
