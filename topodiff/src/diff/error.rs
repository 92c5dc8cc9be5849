//! Unit-level failure modes.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::bdot::BdotError;
use crate::overpass::OverpassError;

/// Errors that fail a single diff unit.
///
/// The run loop turns these into failed unit reports; they never abort
/// the batch.
#[derive(Debug, Error)]
pub enum DiffError {
    /// The OSM fetch failed.
    #[error("OSM fetch failed: {0}")]
    Osm(#[from] OverpassError),

    /// The BDOT fetch failed.
    #[error("BDOT fetch failed: {0}")]
    Bdot(#[from] BdotError),

    /// The output directory could not be created.
    #[error("failed to create {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    /// The artifact could not be staged or moved into place.
    #[error("failed to write artifact {path}: {source}")]
    ArtifactWrite { path: PathBuf, source: io::Error },

    /// The artifact feature collection could not be serialized.
    #[error("failed to encode artifact: {0}")]
    Encode(#[from] serde_json::Error),
}
