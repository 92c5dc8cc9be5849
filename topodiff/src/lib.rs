//! topodiff - Finds BDOT10k features missing from OpenStreetMap
//!
//! The library compares two map sources per (theme, region) unit: way
//! geometries fetched live from the Overpass API, and the authoritative
//! BDOT10k layer files published by the national geoportal. Both sides
//! are rasterized onto the H3 hex grid; BDOT features whose cells never
//! touch the dilated OSM coverage are written out as GeoJSON artifacts
//! ready for survey.
//!
//! # High-Level API
//!
//! ```ignore
//! use topodiff::bdot::LocalTopoSource;
//! use topodiff::config::{regions, themes, DiffConfig};
//! use topodiff::diff::DiffOrchestrator;
//! use topodiff::overpass::OverpassClient;
//!
//! let config = DiffConfig::default();
//! let osm = OverpassClient::from_config(&config)?;
//! let topo = LocalTopoSource::from_config(&config);
//!
//! let orchestrator = DiffOrchestrator::new(osm, topo, config);
//! orchestrator.init().await?;
//! let reports = orchestrator.run(themes(), regions(), |_| {}).await;
//! ```

pub mod bdot;
pub mod config;
pub mod coverage;
pub mod diff;
pub mod geometry;
pub mod logging;
pub mod matcher;
pub mod overpass;
pub mod report;

/// Version of the topodiff library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
