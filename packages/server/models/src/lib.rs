#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the village table server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from [`VillageRecord`] to allow independent evolution of the API
//! contract.

use serde::{Deserialize, Serialize};
use village_table_village_models::VillageRecord;

/// A village as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVillage {
    /// 1-based position within the returned list.
    pub index: usize,
    /// Village name.
    pub name: String,
    /// District name.
    pub district: String,
    /// Area text, verbatim from the source file.
    pub area: String,
    /// Center coordinate pair.
    pub center: [f64; 2],
    /// Geometry JSON text.
    pub geometry: String,
}

impl ApiVillage {
    /// Builds the entry at 0-based `position` of a result list.
    #[must_use]
    pub fn from_record(position: usize, record: &VillageRecord) -> Self {
        Self {
            index: position + 1,
            name: record.name.clone(),
            district: record.district.clone(),
            area: record.area.clone(),
            center: record.center.0,
            geometry: record.geometry.clone(),
        }
    }
}

/// Query parameters for the search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Search term matched against village names; absent means all.
    pub q: Option<String>,
}

impl SearchParams {
    /// The term to search for.
    #[must_use]
    pub fn term(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// `GET /api/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Always `true` when the server answers.
    pub healthy: bool,
    /// Server crate version.
    pub version: String,
    /// Whether a load has succeeded.
    pub loaded: bool,
    /// Number of stored villages.
    pub record_count: usize,
}

/// `POST /api/reload` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReload {
    /// Number of villages after the reload.
    pub record_count: usize,
}

/// Error body for failed API calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
}
