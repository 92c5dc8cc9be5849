//! Source traits the orchestrator pulls data through.

use std::future::Future;

use crate::bdot::BdotError;
use crate::config::{Region, Theme};
use crate::geometry::{Feature, Geometry};
use crate::overpass::OverpassError;

/// Supplies current OSM way geometries for a unit.
pub trait OsmSource: Send + Sync {
    /// Fetches every way matching the theme's filter inside the region.
    fn fetch_ways(
        &self,
        theme: &Theme,
        region: &Region,
    ) -> impl Future<Output = Result<Vec<Geometry>, OverpassError>> + Send;
}

/// Supplies authoritative BDOT features for a unit.
pub trait TopoSource: Send + Sync {
    /// Fetches the theme's layer features for the region.
    fn fetch_features(
        &self,
        theme: &Theme,
        region: &Region,
    ) -> impl Future<Output = Result<Vec<Feature>, BdotError>> + Send;
}
