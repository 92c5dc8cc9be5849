//! Run command - download source data and diff the selected units.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use h3o::Resolution;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use topodiff::bdot::{ArchiveStore, LocalTopoSource};
use topodiff::config::{self, DiffConfig, Region, Theme};
use topodiff::diff::{DiffOrchestrator, UnitOutcome, UnitReport};
use topodiff::logging::{default_log_dir, default_log_file, init_logging};
use topodiff::overpass::OverpassClient;
use topodiff::report::write_index;

use crate::error::CliError;

/// Arguments for the run command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Theme to diff, may be given multiple times (default: all themes)
    #[arg(long = "theme", value_name = "NAME")]
    pub themes: Vec<String>,

    /// Region to diff, by name or TERYT code, may be given multiple
    /// times (default: all regions)
    #[arg(long = "region", value_name = "NAME")]
    pub regions: Vec<String>,

    /// Directory for downloaded BDOT archives and extracted layers
    #[arg(long, default_value = config::DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory for missing-feature artifacts
    #[arg(long, default_value = config::DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Overpass API endpoint
    #[arg(long, default_value = topodiff::overpass::DEFAULT_OVERPASS_URL)]
    pub overpass_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// H3 resolution for coverage rasterization (0-15)
    #[arg(long, default_value = "12")]
    pub resolution: u8,
}

/// Run the diff over every selected (theme, region) unit.
pub async fn run(args: RunArgs) -> Result<(), CliError> {
    let _logging = init_logging(default_log_dir(), default_log_file())
        .map_err(|err| CliError::LoggingInit(err.to_string()))?;

    let themes = resolve_themes(&args.themes)?;
    let regions = resolve_regions(&args.regions)?;
    let resolution = Resolution::try_from(args.resolution)
        .map_err(|_| CliError::Config(format!("invalid H3 resolution {}", args.resolution)))?;

    let config = DiffConfig::new()
        .with_data_dir(args.data_dir)
        .with_output_dir(args.output_dir)
        .with_overpass_url(args.overpass_url)
        .with_request_timeout(Duration::from_secs(args.timeout))
        .with_resolution(resolution);

    println!("topodiff v{}", topodiff::VERSION);
    println!("==========");
    println!();
    println!("Themes:   {}", joined_names(themes.iter().map(|t| t.name)));
    println!("Regions:  {}", joined_names(regions.iter().map(|r| r.name)));
    println!("Data dir: {}", config.data_dir.display());
    println!("Output:   {}", config.output_dir.display());
    println!();

    let store = ArchiveStore::new(&config).map_err(|err| CliError::Client(err.to_string()))?;
    let osm = OverpassClient::from_config(&config).map_err(|err| CliError::Client(err.to_string()))?;
    let topo = LocalTopoSource::from_config(&config);
    let orchestrator = DiffOrchestrator::new(osm, topo, config.clone());
    orchestrator.init().await.map_err(CliError::Init)?;

    let bar = ProgressBar::new((themes.len() * regions.len()) as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:30}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut reports = Vec::with_capacity(themes.len() * regions.len());
    for region in &regions {
        // A failed download is not fatal: the region's units run anyway
        // and fail individually with a missing-layer report.
        if let Err(err) = store.ensure(region).await {
            error!(region = region.name, error = %err, "archive download failed");
        }

        let mut region_reports = orchestrator
            .run(&themes, std::slice::from_ref(region), |report| {
                bar.set_message(format!("{} {}", report.region, report.theme));
                bar.inc(1);
            })
            .await;
        reports.append(&mut region_reports);
    }
    bar.finish_with_message("done");

    let index_path = write_index(&reports, &config.output_dir).map_err(|error| {
        CliError::IndexWrite {
            path: config.output_dir.join("index.html"),
            error,
        }
    })?;

    print_summary(&reports, &index_path);
    Ok(())
}

fn resolve_themes(names: &[String]) -> Result<Vec<Theme>, CliError> {
    if names.is_empty() {
        return Ok(config::themes().to_vec());
    }
    names
        .iter()
        .map(|name| {
            config::theme_by_name(name)
                .copied()
                .ok_or_else(|| CliError::Config(format!("unknown theme '{name}'")))
        })
        .collect()
}

fn resolve_regions(names: &[String]) -> Result<Vec<Region>, CliError> {
    if names.is_empty() {
        return Ok(config::regions().to_vec());
    }
    names
        .iter()
        .map(|name| {
            config::region_by_name(name)
                .copied()
                .ok_or_else(|| CliError::Config(format!("unknown region '{name}'")))
        })
        .collect()
}

fn joined_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

fn print_summary(reports: &[UnitReport], index_path: &Path) {
    let mut diffed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut missing_total = 0usize;
    for report in reports {
        match &report.outcome {
            UnitOutcome::Diffed { missing, .. } => {
                diffed += 1;
                missing_total += missing;
            }
            UnitOutcome::Skipped { .. } => skipped += 1,
            UnitOutcome::Failed { .. } => failed += 1,
        }
    }

    println!();
    println!(
        "Diffed {diffed} units ({missing_total} missing features), skipped {skipped}, failed {failed}"
    );
    for report in reports {
        if let UnitOutcome::Failed { reason } = &report.outcome {
            println!("  {} {}: {}", report.region, report.theme, reason);
        }
    }
    println!();
    println!("Results index: {}", index_path.display());
}
