//! Per-unit diff orchestration.
//!
//! A unit is one (theme, region) pair. The orchestrator fetches both
//! sources for the unit, matches candidate features against the OSM
//! coverage and writes the missing ones to a GeoJSON artifact. Units
//! run sequentially and fail independently; an existing artifact
//! short-circuits its unit entirely, which is what makes interrupted
//! batches resumable.

mod error;
mod orchestrator;
mod sources;

pub use error::DiffError;
pub use orchestrator::{DiffOrchestrator, UnitOutcome, UnitReport};
pub use sources::{OsmSource, TopoSource};
