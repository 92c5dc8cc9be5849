//! Static results index.
//!
//! One download link per completed unit, rendered into a single HTML
//! page meant to sit next to the artifacts. Failed units have no
//! artifact and are left out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::diff::{UnitOutcome, UnitReport};

/// Renders the download index for a batch of unit reports.
///
/// Links use bare file names, so the page must be served from the
/// artifact directory itself.
pub fn render_index(reports: &[UnitReport], generated_at: DateTime<Utc>) -> String {
    let mut page = String::from("<!doctype html>\n<title>topodiff results</title>\n");
    for report in reports {
        match &report.outcome {
            UnitOutcome::Diffed {
                missing, artifact, ..
            } => {
                if let Some(file) = file_name(artifact) {
                    page.push_str(&format!(
                        "<a href='{file}' download>{} {} ({missing} missing)</a><br/>\n",
                        report.region, report.theme
                    ));
                }
            }
            UnitOutcome::Skipped { artifact } => {
                if let Some(file) = file_name(artifact) {
                    page.push_str(&format!(
                        "<a href='{file}' download>{} {}</a><br/>\n",
                        report.region, report.theme
                    ));
                }
            }
            UnitOutcome::Failed { .. } => {}
        }
    }
    page.push_str(&format!(
        "<p>generated {}</p>\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    page
}

/// Renders the index stamped with the current time and writes it as
/// `index.html` into the artifact directory.
pub fn write_index(reports: &[UnitReport], output_dir: &Path) -> io::Result<PathBuf> {
    let path = output_dir.join("index.html");
    fs::write(&path, render_index(reports, Utc::now()))?;
    Ok(path)
}

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn report(theme: &'static str, teryt: &'static str, outcome: UnitOutcome) -> UnitReport {
        UnitReport {
            theme,
            region: "Warszawa",
            teryt,
            outcome,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_diffed_unit_links_artifact_with_count() {
        let reports = [report(
            "roads",
            "1465",
            UnitOutcome::Diffed {
                missing: 3,
                present: 120,
                unsupported: 1,
                artifact: PathBuf::from("missing/roads-1465.geojson"),
            },
        )];

        let page = render_index(&reports, noon());
        assert!(
            page.contains("<a href='roads-1465.geojson' download>Warszawa roads (3 missing)</a><br/>"),
            "page was: {page}"
        );
    }

    #[test]
    fn test_skipped_unit_links_artifact_without_count() {
        let reports = [report(
            "footways",
            "1465",
            UnitOutcome::Skipped {
                artifact: PathBuf::from("missing/footways-1465.geojson"),
            },
        )];

        let page = render_index(&reports, noon());
        assert!(page.contains("<a href='footways-1465.geojson' download>Warszawa footways</a><br/>"));
    }

    #[test]
    fn test_failed_unit_is_omitted() {
        let reports = [
            report(
                "roads",
                "1465",
                UnitOutcome::Failed {
                    reason: "OSM fetch failed".to_string(),
                },
            ),
            report(
                "powerlines",
                "1465",
                UnitOutcome::Diffed {
                    missing: 0,
                    present: 4,
                    unsupported: 0,
                    artifact: PathBuf::from("missing/powerlines-1465.geojson"),
                },
            ),
        ];

        let page = render_index(&reports, noon());
        assert!(!page.contains("roads"));
        assert!(page.contains("powerlines-1465.geojson"));
    }

    #[test]
    fn test_page_carries_generation_timestamp() {
        let page = render_index(&[], noon());
        assert!(page.contains("generated 2024-06-01T12:00:00Z"));
    }

    #[test]
    fn test_write_index_places_page_in_output_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let reports = [report(
            "roads",
            "2261",
            UnitOutcome::Diffed {
                missing: 7,
                present: 33,
                unsupported: 0,
                artifact: temp.path().join("roads-2261.geojson"),
            },
        )];

        let path = write_index(&reports, temp.path()).unwrap();

        assert_eq!(path, temp.path().join("index.html"));
        let page = fs::read_to_string(&path).unwrap();
        assert!(page.contains("roads-2261.geojson"));
        assert!(page.contains("generated "));
    }
}
