//! Unit processing and the sequential run loop.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use super::sources::{OsmSource, TopoSource};
use super::DiffError;
use crate::config::{DiffConfig, Region, Theme};
use crate::geometry::Feature;
use crate::matcher::{authoritative_coverage, match_features};

/// How a single unit ended.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutcome {
    /// Both sources answered and the artifact was written.
    Diffed {
        missing: usize,
        present: usize,
        unsupported: usize,
        artifact: PathBuf,
    },

    /// The artifact already existed; nothing was fetched.
    Skipped { artifact: PathBuf },

    /// The unit failed; no artifact was written.
    Failed { reason: String },
}

/// Report for one processed unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitReport {
    pub theme: &'static str,
    pub region: &'static str,
    pub teryt: &'static str,
    pub outcome: UnitOutcome,
}

/// Drives diff units against a pair of sources.
pub struct DiffOrchestrator<O: OsmSource, T: TopoSource> {
    osm: O,
    topo: T,
    config: DiffConfig,
}

impl<O: OsmSource, T: TopoSource> DiffOrchestrator<O, T> {
    pub fn new(osm: O, topo: T, config: DiffConfig) -> Self {
        Self { osm, topo, config }
    }

    /// The OSM source units fetch from.
    pub fn osm_source(&self) -> &O {
        &self.osm
    }

    /// The BDOT source units fetch from.
    pub fn topo_source(&self) -> &T {
        &self.topo
    }

    /// Creates the output directory. Call once before processing;
    /// artifact writes assume it exists.
    pub async fn init(&self) -> Result<(), DiffError> {
        tokio::fs::create_dir_all(&self.config.output_dir)
            .await
            .map_err(|source| DiffError::CreateDir {
                path: self.config.output_dir.clone(),
                source,
            })
    }

    /// Artifact path for a unit.
    pub fn artifact_path(&self, theme: &Theme, region: &Region) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}-{}.geojson", theme.name, region.teryt))
    }

    /// Processes one unit.
    ///
    /// Returns `Skipped` without touching either source when the
    /// artifact already exists. Otherwise both sources are fetched
    /// concurrently; if either fails, the unit fails and no artifact
    /// is written, so the next run retries it from scratch.
    pub async fn process_unit(
        &self,
        theme: &Theme,
        region: &Region,
    ) -> Result<UnitOutcome, DiffError> {
        let artifact = self.artifact_path(theme, region);
        if artifact.exists() {
            info!(
                theme = theme.name,
                region = region.name,
                artifact = %artifact.display(),
                "artifact exists, skipping unit"
            );
            return Ok(UnitOutcome::Skipped { artifact });
        }

        let started = Instant::now();
        let (ways, features) = tokio::try_join!(
            async {
                self.osm
                    .fetch_ways(theme, region)
                    .await
                    .map_err(DiffError::from)
            },
            async {
                self.topo
                    .fetch_features(theme, region)
                    .await
                    .map_err(DiffError::from)
            }
        )?;

        let coverage = authoritative_coverage(&ways, self.config.resolution);
        debug!(
            theme = theme.name,
            region = region.name,
            ways = ways.len(),
            cells = coverage.len(),
            "built OSM coverage"
        );

        let outcome = match_features(features, &coverage, self.config.resolution);
        self.write_artifact(&artifact, &outcome.missing).await?;

        info!(
            theme = theme.name,
            region = region.name,
            missing = outcome.missing.len(),
            present = outcome.present,
            unsupported = outcome.unsupported,
            elapsed_ms = started.elapsed().as_millis() as u64,
            artifact = %artifact.display(),
            "unit diffed"
        );
        Ok(UnitOutcome::Diffed {
            missing: outcome.missing.len(),
            present: outcome.present,
            unsupported: outcome.unsupported,
            artifact,
        })
    }

    /// Writes the missing features as a GeoJSON feature collection.
    ///
    /// The collection is staged next to the artifact and moved into
    /// place afterwards, so the artifact path only ever holds a
    /// complete file. An empty collection is still written; it marks
    /// the unit as done.
    async fn write_artifact(&self, path: &Path, missing: &[Feature]) -> Result<(), DiffError> {
        let collection = geojson::FeatureCollection {
            bbox: None,
            features: missing.iter().filter_map(Feature::to_geojson).collect(),
            foreign_members: None,
        };
        let payload = serde_json::to_string(&collection)?;

        let staged = path.with_extension("geojson.tmp");
        tokio::fs::write(&staged, payload)
            .await
            .map_err(|source| DiffError::ArtifactWrite {
                path: staged.clone(),
                source,
            })?;
        tokio::fs::rename(&staged, path)
            .await
            .map_err(|source| DiffError::ArtifactWrite {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Processes every (theme, region) pair sequentially, regions
    /// outermost.
    ///
    /// A failed unit becomes a `Failed` report and the run moves on;
    /// one unit never takes the batch down. `on_unit` runs after each
    /// unit, for progress reporting.
    pub async fn run(
        &self,
        themes: &[Theme],
        regions: &[Region],
        mut on_unit: impl FnMut(&UnitReport),
    ) -> Vec<UnitReport> {
        let mut reports = Vec::with_capacity(themes.len() * regions.len());
        for region in regions {
            for theme in themes {
                let outcome = match self.process_unit(theme, region).await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        warn!(
                            theme = theme.name,
                            region = region.name,
                            error = %err,
                            "unit failed"
                        );
                        UnitOutcome::Failed {
                            reason: err.to_string(),
                        }
                    }
                };
                let report = UnitReport {
                    theme: theme.name,
                    region: region.name,
                    teryt: region.teryt,
                    outcome,
                };
                on_unit(&report);
                reports.push(report);
            }
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::super::sources::tests::{FailingOsmSource, StaticOsmSource, StaticTopoSource};
    use super::*;
    use crate::config::{region_by_name, theme_by_name};
    use crate::geometry::{GeoPoint, Geometry};
    use geojson::JsonObject;

    fn warsaw_line() -> Geometry {
        Geometry::Line(vec![
            GeoPoint::new(21.0122, 52.2297),
            GeoPoint::new(21.0131, 52.2302),
        ])
    }

    fn krakow_line() -> Geometry {
        Geometry::Line(vec![
            GeoPoint::new(19.9449, 50.0646),
            GeoPoint::new(19.9458, 50.0651),
        ])
    }

    fn candidate(geometry: Geometry, class: &str) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("KLASA".to_string(), class.into());
        Feature {
            geometry,
            properties,
        }
    }

    fn config_in(dir: &Path) -> DiffConfig {
        DiffConfig::new().with_output_dir(dir)
    }

    #[tokio::test]
    async fn test_process_unit_writes_missing_features() {
        let temp = tempfile::TempDir::new().unwrap();
        let orchestrator = DiffOrchestrator::new(
            StaticOsmSource::new(vec![warsaw_line()]),
            StaticTopoSource::new(vec![
                candidate(warsaw_line(), "droga gminna"),
                candidate(krakow_line(), "droga powiatowa"),
            ]),
            config_in(temp.path()),
        );
        orchestrator.init().await.unwrap();

        let roads = theme_by_name("roads").unwrap();
        let warszawa = region_by_name("Warszawa").unwrap();
        let outcome = orchestrator.process_unit(roads, warszawa).await.unwrap();

        let artifact = orchestrator.artifact_path(roads, warszawa);
        assert_eq!(
            outcome,
            UnitOutcome::Diffed {
                missing: 1,
                present: 1,
                unsupported: 0,
                artifact: artifact.clone(),
            }
        );

        let raw = std::fs::read_to_string(&artifact).unwrap();
        let collection: geojson::FeatureCollection = serde_json::from_str(&raw).unwrap();
        assert_eq!(collection.features.len(), 1);
        let properties = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(
            properties.get("KLASA").and_then(|v| v.as_str()),
            Some("droga powiatowa"),
            "the distant road is the one that should be reported"
        );
    }

    #[test]
    fn test_artifact_path_encodes_theme_and_teryt() {
        let temp = tempfile::TempDir::new().unwrap();
        let orchestrator = DiffOrchestrator::new(
            StaticOsmSource::new(vec![]),
            StaticTopoSource::new(vec![]),
            config_in(temp.path()),
        );

        let power = theme_by_name("powerlines").unwrap();
        let gdansk = region_by_name("Gdańsk").unwrap();
        assert_eq!(
            orchestrator.artifact_path(power, gdansk),
            temp.path().join("powerlines-2261.geojson")
        );
    }

    #[tokio::test]
    async fn test_existing_artifact_short_circuits_unit() {
        let temp = tempfile::TempDir::new().unwrap();
        let osm = StaticOsmSource::new(vec![warsaw_line()]);
        let topo = StaticTopoSource::new(vec![candidate(warsaw_line(), "droga gminna")]);
        let orchestrator = DiffOrchestrator::new(osm, topo, config_in(temp.path()));
        orchestrator.init().await.unwrap();

        let roads = theme_by_name("roads").unwrap();
        let warszawa = region_by_name("Warszawa").unwrap();
        let artifact = orchestrator.artifact_path(roads, warszawa);
        std::fs::write(&artifact, "{}").unwrap();

        let outcome = orchestrator.process_unit(roads, warszawa).await.unwrap();
        assert_eq!(
            outcome,
            UnitOutcome::Skipped {
                artifact: artifact.clone(),
            }
        );
        assert_eq!(orchestrator.osm_source().call_count(), 0);
        assert_eq!(orchestrator.topo_source().call_count(), 0);
        assert_eq!(
            std::fs::read_to_string(&artifact).unwrap(),
            "{}",
            "an existing artifact must never be rewritten"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_fails_unit_without_artifact() {
        let temp = tempfile::TempDir::new().unwrap();
        let orchestrator = DiffOrchestrator::new(
            FailingOsmSource,
            StaticTopoSource::new(vec![candidate(krakow_line(), "droga gminna")]),
            config_in(temp.path()),
        );
        orchestrator.init().await.unwrap();

        let roads = theme_by_name("roads").unwrap();
        let warszawa = region_by_name("Warszawa").unwrap();
        let err = orchestrator.process_unit(roads, warszawa).await.unwrap_err();

        assert!(matches!(err, DiffError::Osm(_)));
        assert!(
            !orchestrator.artifact_path(roads, warszawa).exists(),
            "a failed unit must not leave an artifact behind"
        );
    }

    #[tokio::test]
    async fn test_run_reports_every_unit() {
        let temp = tempfile::TempDir::new().unwrap();
        let orchestrator = DiffOrchestrator::new(
            StaticOsmSource::new(vec![warsaw_line()]),
            StaticTopoSource::new(vec![candidate(krakow_line(), "chodnik")]),
            config_in(temp.path()),
        );
        orchestrator.init().await.unwrap();

        let themes = [
            *theme_by_name("roads").unwrap(),
            *theme_by_name("footways").unwrap(),
        ];
        let warszawa = region_by_name("Warszawa").unwrap();

        let mut seen = 0;
        let reports = orchestrator
            .run(&themes, std::slice::from_ref(warszawa), |_| seen += 1)
            .await;

        assert_eq!(seen, 2);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].theme, "roads");
        assert_eq!(reports[1].theme, "footways");
        for report in &reports {
            assert!(
                matches!(report.outcome, UnitOutcome::Diffed { missing: 1, .. }),
                "unexpected outcome: {:?}",
                report.outcome
            );
        }
    }

    #[tokio::test]
    async fn test_run_continues_after_unit_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let orchestrator = DiffOrchestrator::new(
            FailingOsmSource,
            StaticTopoSource::new(vec![]),
            config_in(temp.path()),
        );
        orchestrator.init().await.unwrap();

        let themes = [
            *theme_by_name("roads").unwrap(),
            *theme_by_name("powerlines").unwrap(),
        ];
        let warszawa = region_by_name("Warszawa").unwrap();
        let reports = orchestrator
            .run(&themes, std::slice::from_ref(warszawa), |_| {})
            .await;

        assert_eq!(reports.len(), 2, "a failed unit must not end the batch");
        for report in &reports {
            match &report.outcome {
                UnitOutcome::Failed { reason } => {
                    assert!(reason.contains("OSM fetch failed"));
                }
                other => panic!("expected Failed, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_run_resumes_past_completed_units() {
        let temp = tempfile::TempDir::new().unwrap();
        let orchestrator = DiffOrchestrator::new(
            StaticOsmSource::new(vec![warsaw_line()]),
            StaticTopoSource::new(vec![candidate(warsaw_line(), "droga gminna")]),
            config_in(temp.path()),
        );
        orchestrator.init().await.unwrap();

        let roads = theme_by_name("roads").unwrap();
        let footways = theme_by_name("footways").unwrap();
        let warszawa = region_by_name("Warszawa").unwrap();
        std::fs::write(orchestrator.artifact_path(roads, warszawa), "{}").unwrap();

        let themes = [*roads, *footways];
        let reports = orchestrator
            .run(&themes, std::slice::from_ref(warszawa), |_| {})
            .await;

        assert!(matches!(reports[0].outcome, UnitOutcome::Skipped { .. }));
        assert!(matches!(reports[1].outcome, UnitOutcome::Diffed { .. }));
        assert_eq!(
            orchestrator.osm_source().call_count(),
            1,
            "only the unfinished unit may fetch"
        );
    }
}
