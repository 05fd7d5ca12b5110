#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Village table record and source definition types.
//!
//! Defines where the village boundary file comes from, which feature
//! properties hold the columns of the table, and the in-memory record and
//! row types produced after fetching.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use village_table_geometry::Center;

/// Location of the village boundary file when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data-spatials/batas-desa-buleleng.json";

/// Where to read the village `GeoJSON` `FeatureCollection` from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataSourceConfig {
    /// A file on the local filesystem.
    File {
        /// Path to the `GeoJSON` file.
        path: PathBuf,
    },
    /// A URL answering a single GET with the `GeoJSON` document.
    Url {
        /// Full URL of the document.
        url: String,
    },
}

impl DataSourceConfig {
    /// Interprets a bare location string: `http://` and `https://`
    /// locations are URLs, anything else is a file path.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url {
                url: location.to_string(),
            }
        } else {
            Self::File {
                path: PathBuf::from(location),
            }
        }
    }

    /// Human-readable location, for logs.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::File { path } => path.display().to_string(),
            Self::Url { url } => url.clone(),
        }
    }
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self::File {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

/// Feature property names holding each table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VillageFieldMapping {
    /// Village name (`NAMOBJ` in the Indonesian boundary datasets).
    pub name: String,
    /// District / sub-area name (`WADMKC`).
    pub district: String,
    /// Area value (`LUASWH`).
    pub area: String,
}

impl Default for VillageFieldMapping {
    fn default() -> Self {
        Self {
            name: "NAMOBJ".to_string(),
            district: "WADMKC".to_string(),
            area: "LUASWH".to_string(),
        }
    }
}

/// One village, derived from one feature of the last successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageRecord {
    /// Village name.
    pub name: String,
    /// District the village belongs to.
    pub district: String,
    /// Area exactly as written in the source file.
    pub area: String,
    /// Representative center coordinate.
    pub center: Center,
    /// The feature's geometry object serialized back to JSON text.
    pub geometry: String,
}

impl VillageRecord {
    /// Whether the name contains `needle`, which must already be lowercase.
    #[must_use]
    pub fn name_matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

/// A record as shown in the table, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// 1-based row number within the rendered view.
    pub index: usize,
    /// Village name.
    pub name: String,
    /// District name.
    pub district: String,
    /// Area text, verbatim.
    pub area: String,
    /// Center rendered as `[a,b]`.
    pub center: String,
    /// Geometry JSON text.
    pub geometry: String,
}

impl TableRow {
    /// Builds the row at 0-based `position` of a rendered view.
    #[must_use]
    pub fn from_record(position: usize, record: &VillageRecord) -> Self {
        Self {
            index: position + 1,
            name: record.name.clone(),
            district: record.district.clone(),
            area: record.area.clone(),
            center: record.center.to_string(),
            geometry: record.geometry.clone(),
        }
    }
}
