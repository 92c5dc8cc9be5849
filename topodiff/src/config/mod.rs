//! Run configuration.
//!
//! `DiffConfig` combines every knob a diff run needs: directories,
//! the Overpass endpoint, the HTTP timeout and the grid resolution.
//! Theme and region tables are compiled in and passed explicitly to
//! whoever needs them; nothing here is global or mutable at runtime.

mod regions;
mod themes;

pub use regions::{region_by_name, regions, Region};
pub use themes::{theme_by_name, themes, Theme};

use std::path::PathBuf;
use std::time::Duration;

use h3o::Resolution;

use crate::overpass::DEFAULT_OVERPASS_URL;

/// Default directory for downloaded and extracted BDOT archives.
pub const DEFAULT_DATA_DIR: &str = "bdot-data";

/// Default directory for missing-feature artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "missing";

/// Default HTTP timeout for source requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a diff run.
#[derive(Clone, Debug)]
pub struct DiffConfig {
    /// Directory holding BDOT archives and their extracted layers.
    pub data_dir: PathBuf,

    /// Directory the missing-feature artifacts are written to.
    pub output_dir: PathBuf,

    /// Overpass API endpoint.
    pub overpass_url: String,

    /// Timeout applied to HTTP requests against the sources.
    pub request_timeout: Duration,

    /// H3 resolution shared by every coverage computation in the run.
    pub resolution: Resolution,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            resolution: Resolution::Twelve,
        }
    }
}

impl DiffConfig {
    /// Creates a config with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the artifact output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the Overpass endpoint.
    pub fn with_overpass_url(mut self, url: impl Into<String>) -> Self {
        self.overpass_url = url.into();
        self
    }

    /// Set the HTTP request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the grid resolution.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }
}
