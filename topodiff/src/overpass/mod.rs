//! OpenStreetMap access through an Overpass endpoint.
//!
//! Queries are scoped to a region via its `teryt:terc` area tag and
//! filtered by the theme's way selector. The endpoint answers with an
//! element list whose geometries are classified into the closed
//! geometry model before anything else touches them.

mod client;
mod query;
mod response;

pub use client::{OverpassClient, DEFAULT_OVERPASS_URL};
pub use query::{way_query, QUERY_TIMEOUT_SECS};
pub use response::{OverpassElement, OverpassResponse};

use thiserror::Error;

/// Errors from the Overpass source.
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Building the client or performing the request failed.
    #[error("overpass request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("overpass returned HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The response body was not a valid element list.
    #[error("failed to parse overpass response: {0}")]
    Parse(#[from] serde_json::Error),
}
