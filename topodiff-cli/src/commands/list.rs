//! Themes and regions commands - list the built-in tables.

use topodiff::config;

use crate::error::CliError;

/// Print the built-in themes.
pub fn themes() -> Result<(), CliError> {
    println!("{:<16} {:<12} OVERPASS FILTER", "THEME", "BDOT LAYER");
    for theme in config::themes() {
        println!(
            "{:<16} {:<12} {}",
            theme.name, theme.bdot_layer, theme.overpass_filter
        );
    }
    Ok(())
}

/// Print the built-in regions.
pub fn regions() -> Result<(), CliError> {
    println!("{:<16} TERYT", "REGION");
    for region in config::regions() {
        println!("{:<16} {}", region.name, region.teryt);
    }
    Ok(())
}
