//! Blocking HTTP backend for the Django routing service.

use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;

use crate::backend::RouteBackend;
use crate::config::PlannerConfig;
use crate::error::BackendError;
use crate::payload::{BoundingBox, RoutePayload};
use crate::request::RouteQuery;

#[derive(Debug, Clone)]
pub struct HttpRouteBackend {
    client: Client,
    route_url: Url,
    boundaries_url: Option<Url>,
}

impl HttpRouteBackend {
    pub fn new(config: &PlannerConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(BackendError::Http)?;
        let route_url = endpoint_url(&config.base_url, &config.route_path)?;
        let boundaries_url = config
            .boundaries_path
            .as_deref()
            .map(|path| endpoint_url(&config.base_url, path))
            .transpose()?;
        log::info!("routing backend at {route_url}");
        Ok(Self {
            client,
            route_url,
            boundaries_url,
        })
    }

    pub fn route_url(&self) -> &Url {
        &self.route_url
    }

    fn get_json(&self, base: &Url, query: &RouteQuery) -> Result<Value, BackendError> {
        let url = with_query(base, query);
        log::debug!("GET {url}");
        let response = self.client.get(url).send().map_err(BackendError::Http)?;
        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }
        response.json::<Value>().map_err(BackendError::Decode)
    }
}

impl RouteBackend for HttpRouteBackend {
    fn fetch_route(&self, query: &RouteQuery) -> Result<RoutePayload, BackendError> {
        let body = self.get_json(&self.route_url, query)?;
        Ok(RoutePayload::from_json(body)?)
    }

    fn fetch_bounding_box(&self, query: &RouteQuery) -> Result<Option<BoundingBox>, BackendError> {
        let Some(url) = &self.boundaries_url else {
            return Ok(None);
        };
        let body = self.get_json(url, query)?;
        Ok(BoundingBox::from_json(body)?)
    }
}

/// `base` and `path` joined with exactly one slash between them.
pub fn endpoint_url(base: &str, path: &str) -> Result<Url, BackendError> {
    let joined = format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|_| BackendError::Url(joined))
}

/// The request URL for `query`, parameters percent-encoded in wire order.
pub fn with_query(base: &Url, query: &RouteQuery) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(query.query_pairs());
    url
}

#[cfg(test)]
mod tests;
