//! Extracted layer files.

use std::path::PathBuf;
use std::time::Instant;

use geojson::JsonObject;
use tracing::info;

use super::BdotError;
use crate::config::{DiffConfig, Region, Theme};
use crate::diff::TopoSource;
use crate::geometry::Feature;

/// Bookkeeping columns removed from every feature before it is carried
/// further. They describe the BDOT release process, not the object, and
/// only bloat the artifacts.
pub const DROPPED_COLUMNS: [&str; 8] = [
    "WERSJA",
    "POCZATEKWERSJIOBIEKTU",
    "PRZESTRZENNAZW",
    "LOKALNYID",
    "KATEGORIAISTNIENIA",
    "KODKARTO10K",
    "TERYT",
    "OZNACZENIEZMIANY",
];

/// Serves thematic layers from extracted archive files in the data
/// directory.
///
/// Layer files are named `<id>.BDOT10k.<teryt>__<layer>.geojson`, with
/// an archive-assigned numeric prefix, so lookup goes through a glob
/// rather than an exact path.
pub struct LocalTopoSource {
    data_dir: PathBuf,
}

impl LocalTopoSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &DiffConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    fn layer_pattern(&self, theme: &Theme, region: &Region) -> String {
        self.data_dir
            .join(format!(
                "*.BDOT10k.{}__{}.geojson",
                region.teryt, theme.bdot_layer
            ))
            .to_string_lossy()
            .into_owned()
    }

    fn find_layer_file(&self, theme: &Theme, region: &Region) -> Result<PathBuf, BdotError> {
        let pattern = self.layer_pattern(theme, region);
        let paths = glob::glob(&pattern).map_err(|err| BdotError::Pattern {
            pattern: pattern.clone(),
            reason: err.to_string(),
        })?;
        paths
            .filter_map(Result::ok)
            .next()
            .ok_or(BdotError::MissingLayer { pattern })
    }
}

impl TopoSource for LocalTopoSource {
    async fn fetch_features(
        &self,
        theme: &Theme,
        region: &Region,
    ) -> Result<Vec<Feature>, BdotError> {
        let path = self.find_layer_file(theme, region)?;
        let started = Instant::now();

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| BdotError::Io {
                path: path.clone(),
                source,
            })?;
        let collection: geojson::FeatureCollection =
            serde_json::from_str(&raw).map_err(|source| BdotError::Parse {
                path: path.clone(),
                source,
            })?;

        let features: Vec<Feature> = collection
            .features
            .into_iter()
            .map(|feature| {
                let mut feature = Feature::from_geojson(feature);
                strip_bookkeeping_columns(&mut feature.properties);
                feature
            })
            .collect();

        info!(
            theme = theme.name,
            region = region.name,
            features = features.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            layer = %path.display(),
            "loaded BDOT layer"
        );
        Ok(features)
    }
}

fn strip_bookkeeping_columns(properties: &mut JsonObject) {
    for column in DROPPED_COLUMNS {
        properties.remove(column);
    }
}
