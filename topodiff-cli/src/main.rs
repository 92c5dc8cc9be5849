//! topodiff CLI - Command-line interface
//!
//! This binary provides a command-line interface to the topodiff
//! library.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "topodiff")]
#[command(version = topodiff::VERSION)]
#[command(about = "Find BDOT10k features missing from OpenStreetMap", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download source data and diff every selected theme and region
    Run(RunArgs),
    /// List the built-in themes
    Themes,
    /// List the built-in regions
    Regions,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Themes => commands::list::themes(),
        Commands::Regions => commands::list::regions(),
    };

    if let Err(err) = result {
        err.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags_parse() {
        let cli = Cli::try_parse_from([
            "topodiff",
            "run",
            "--theme",
            "roads",
            "--theme",
            "footways",
            "--region",
            "1465",
            "--output-dir",
            "/tmp/out",
            "--timeout",
            "10",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.themes, vec!["roads", "footways"]);
                assert_eq!(args.regions, vec!["1465"]);
                assert_eq!(args.output_dir, std::path::PathBuf::from("/tmp/out"));
                assert_eq!(args.timeout, 10);
                assert_eq!(args.resolution, 12);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_listing_subcommands_parse() {
        assert!(matches!(
            Cli::try_parse_from(["topodiff", "themes"]).unwrap().command,
            Commands::Themes
        ));
        assert!(matches!(
            Cli::try_parse_from(["topodiff", "regions"]).unwrap().command,
            Commands::Regions
        ));
    }
}
