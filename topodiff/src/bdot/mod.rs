//! BDOT10k topographic data access.
//!
//! The national geoportal publishes one zip archive per county, keyed
//! by TERYT code and grouped by voivodeship. `ArchiveStore` downloads
//! and extracts those archives into the data directory, caching them on
//! disk; `LocalTopoSource` then serves individual thematic layers from
//! the extracted per-layer GeoJSON files.

mod archive;
mod reader;

pub use archive::{ArchiveStore, DEFAULT_ARCHIVE_BASE_URL};
pub use reader::{LocalTopoSource, DROPPED_COLUMNS};

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the BDOT source.
#[derive(Debug, Error)]
pub enum BdotError {
    /// Archive download failed at the transport level.
    #[error("failed to download {url}: {source}")]
    Download { url: String, source: reqwest::Error },

    /// The geoportal answered with a non-success status.
    #[error("download of {url} returned HTTP {status}")]
    DownloadStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Archive extraction failed.
    #[error("failed to extract archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    /// No extracted layer file matches the unit.
    ///
    /// Distinct from fetch failures: the fix is downloading the archive
    /// for the region, not re-running the query.
    #[error("no layer file matching {pattern}; download the BDOT archive for this region first")]
    MissingLayer { pattern: String },

    /// The layer search pattern could not be compiled.
    #[error("invalid layer search pattern {pattern}: {reason}")]
    Pattern { pattern: String, reason: String },

    /// A layer file exists but is not a valid feature collection.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Filesystem access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
