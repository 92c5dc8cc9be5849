//! Overpass response envelope.

use serde::Deserialize;

use crate::geometry::Geometry;

/// Top-level Overpass JSON answer.
///
/// Only the element list matters here; generator metadata and the like
/// are ignored.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One converted element with its inline geometry.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    pub geometry: Option<geojson::Geometry>,
}

impl OverpassResponse {
    /// Classifies the element geometries, dropping elements without one.
    pub fn into_geometries(self) -> Vec<Geometry> {
        self.elements
            .into_iter()
            .filter_map(|element| element.geometry)
            .map(|geometry| Geometry::from_geojson(&geometry))
            .collect()
    }
}
