//! Planner configuration.
//!
//! Loaded from an optional TOML file; every key has a default so an empty or
//! missing file yields a working local setup. CLI flags are applied on top by
//! the front end via [`PlannerConfig::with_overrides`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::binding::MapView;
use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "route_planner.toml";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_ROUTE_PATH: &str = "api/get_path/";
pub const DEFAULT_STYLE_URL: &str = "https://tiles.openfreemap.org/styles/bright";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    pub base_url: String,
    pub route_path: String,
    /// Separate bounding-box endpoint. Unset means envelopes only arrive
    /// inside route responses.
    pub boundaries_path: Option<String>,
    /// Unset means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub style_url: String,
    pub initial_view: MapView,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            route_path: DEFAULT_ROUTE_PATH.to_string(),
            boundaries_path: None,
            request_timeout_secs: None,
            style_url: DEFAULT_STYLE_URL.to_string(),
            initial_view: MapView::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the file/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub boundaries_path: Option<String>,
}

impl PlannerConfig {
    /// Load `path` if given (it must exist), otherwise `route_planner.toml`
    /// in the working directory when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    log::debug!("no {CONFIG_FILE_NAME} found, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        if let Some(timeout) = overrides.request_timeout_secs {
            self.request_timeout_secs = Some(timeout);
        }
        if let Some(path) = overrides.boundaries_path {
            self.boundaries_path = Some(path);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        let has_scheme = base.starts_with("http://") || base.starts_with("https://");
        let has_host = base
            .split_once("://")
            .map(|(_, rest)| !rest.trim_start_matches('/').is_empty())
            .unwrap_or(false);
        if !has_scheme || !has_host {
            return Err(ConfigError::InvalidUrl(self.base_url.clone()));
        }
        let view = &self.initial_view;
        if !crate::geo::LATITUDE_RANGE.contains(&view.latitude)
            || !crate::geo::LONGITUDE_RANGE.contains(&view.longitude)
        {
            return Err(ConfigError::InvalidView(format!(
                "center ({}, {}) is outside the valid coordinate range",
                view.longitude, view.latitude
            )));
        }
        if !(0.0..=22.0).contains(&view.zoom) {
            return Err(ConfigError::InvalidView(format!(
                "zoom {} is outside 0..=22",
                view.zoom
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
