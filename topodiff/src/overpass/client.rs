//! HTTP client for the Overpass endpoint.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::{way_query, OverpassError, OverpassResponse};
use crate::config::{DiffConfig, Region, Theme};
use crate::diff::OsmSource;
use crate::geometry::Geometry;

/// Public Overpass API endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Client bound to one Overpass endpoint.
pub struct OverpassClient {
    client: reqwest::Client,
    url: String,
}

impl OverpassClient {
    /// Creates a client for the given endpoint.
    ///
    /// The timeout covers the whole request, including reading the
    /// response body.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, OverpassError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Creates a client from the run configuration.
    pub fn from_config(config: &DiffConfig) -> Result<Self, OverpassError> {
        Self::new(config.overpass_url.clone(), config.request_timeout)
    }

    /// The endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl OsmSource for OverpassClient {
    async fn fetch_ways(
        &self,
        theme: &Theme,
        region: &Region,
    ) -> Result<Vec<Geometry>, OverpassError> {
        let query = way_query(theme, region);
        debug!(theme = theme.name, region = region.name, "querying overpass");

        let started = Instant::now();
        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OverpassError::Status {
                status,
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        let parsed: OverpassResponse = serde_json::from_str(&body)?;
        let geometries = parsed.into_geometries();

        info!(
            theme = theme.name,
            region = region.name,
            ways = geometries.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched OSM ways"
        );
        Ok(geometries)
    }
}
