//! County archive download and extraction.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use super::BdotError;
use crate::config::{DiffConfig, Region};

/// Base URL of the geoportal BDOT10k GeoJSON distribution.
pub const DEFAULT_ARCHIVE_BASE_URL: &str =
    "https://opendata.geoportal.gov.pl/bdot10k/schemat2021/GeoJSON";

/// Downloads per-county BDOT10k archives and extracts them into the
/// data directory.
///
/// An archive already present on disk is never fetched again; deleting
/// the zip file forces a fresh download. The zip is moved into its
/// final place only after extraction succeeds, so a present archive
/// always means its layer files are present too.
pub struct ArchiveStore {
    client: reqwest::Client,
    base_url: String,
    data_dir: PathBuf,
}

impl ArchiveStore {
    /// Creates a store writing to the configured data directory.
    ///
    /// Only the connect phase is bounded by the configured timeout.
    /// Archive bodies run to hundreds of megabytes, so the transfer
    /// itself gets no deadline.
    pub fn new(config: &DiffConfig) -> Result<Self, BdotError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .build()
            .map_err(|source| BdotError::Download {
                url: DEFAULT_ARCHIVE_BASE_URL.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: DEFAULT_ARCHIVE_BASE_URL.to_string(),
            data_dir: config.data_dir.clone(),
        })
    }

    /// Download URL for a region's archive.
    ///
    /// Archives are grouped by voivodeship, the first two digits of the
    /// TERYT code.
    pub fn archive_url(&self, region: &Region) -> String {
        format!(
            "{}/{}/{}_GeoJSON.zip",
            self.base_url,
            region.voivodeship(),
            region.teryt
        )
    }

    /// Local path of a region's archive.
    pub fn archive_path(&self, region: &Region) -> PathBuf {
        self.data_dir.join(format!("{}_GeoJSON.zip", region.teryt))
    }

    /// Makes a region's layer files available locally, downloading and
    /// extracting the archive if it is not cached yet.
    ///
    /// # Returns
    ///
    /// The path of the cached archive.
    pub async fn ensure(&self, region: &Region) -> Result<PathBuf, BdotError> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| BdotError::Io {
                path: self.data_dir.clone(),
                source,
            })?;

        let archive = self.archive_path(region);
        if archive.exists() {
            info!(
                region = region.name,
                archive = %archive.display(),
                "archive already present, skipping download"
            );
            return Ok(archive);
        }

        let url = self.archive_url(region);
        info!(region = region.name, %url, "downloading BDOT archive");
        let started = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| BdotError::Download {
                url: url.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(BdotError::DownloadStatus { status, url });
        }
        let payload = response
            .bytes()
            .await
            .map_err(|source| BdotError::Download {
                url: url.clone(),
                source,
            })?;
        info!(
            region = region.name,
            bytes = payload.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "downloaded archive"
        );

        let staged = archive.with_extension("zip.part");
        tokio::fs::write(&staged, &payload)
            .await
            .map_err(|source| BdotError::Io {
                path: staged.clone(),
                source,
            })?;

        let extract_started = Instant::now();
        let entries = {
            let zip_path = staged.clone();
            let dest = self.data_dir.clone();
            tokio::task::spawn_blocking(move || extract_archive(&zip_path, &dest))
                .await
                .map_err(|err| BdotError::Archive {
                    path: staged.clone(),
                    reason: format!("extraction task failed: {err}"),
                })??
        };
        tokio::fs::rename(&staged, &archive)
            .await
            .map_err(|source| BdotError::Io {
                path: archive.clone(),
                source,
            })?;
        info!(
            region = region.name,
            entries,
            elapsed_ms = extract_started.elapsed().as_millis() as u64,
            "extracted archive"
        );

        Ok(archive)
    }
}

/// Extracts every entry of `archive` into `dest`, returning the entry
/// count. Blocking; run on a blocking thread from async contexts.
fn extract_archive(archive: &Path, dest: &Path) -> Result<usize, BdotError> {
    let file = std::fs::File::open(archive).map_err(|source| BdotError::Io {
        path: archive.to_path_buf(),
        source,
    })?;
    let mut zip = zip::ZipArchive::new(file).map_err(|err| BdotError::Archive {
        path: archive.to_path_buf(),
        reason: err.to_string(),
    })?;
    let entries = zip.len();
    zip.extract(dest).map_err(|err| BdotError::Archive {
        path: archive.to_path_buf(),
        reason: err.to_string(),
    })?;
    Ok(entries)
}
