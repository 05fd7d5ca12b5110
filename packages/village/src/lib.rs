#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Village boundary fetching, normalization, and table rendering.
//!
//! Reads a village boundary `GeoJSON` `FeatureCollection` from a file or a
//! URL, turns every feature into a [`VillageRecord`] with a representative
//! center, and renders the records (or a name-filtered view of them)
//! through a [`render::RenderSink`].
//!
//! [`VillageRecord`]: village_table_village_models::VillageRecord

pub mod loader;
pub mod normalize;
pub mod render;
pub mod sources;
pub mod table;

use thiserror::Error;

pub use loader::VillageLoader;
pub use render::{HtmlTableSink, RenderSink};
pub use table::VillageTable;

/// Errors that can occur while loading village data.
#[derive(Debug, Error)]
pub enum VillageError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-success status.
    #[error("Request failed with status {status}")]
    Status {
        /// Status returned by the server.
        status: reqwest::StatusCode,
    },

    /// The document is not shaped like a `FeatureCollection`.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
