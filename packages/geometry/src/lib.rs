#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Village boundary geometry types.
//!
//! Raw `GeoJSON` geometry objects are parsed into [`VillageGeometry`], a
//! closed sum type over the shapes the village table understands. Anything
//! else is kept as [`VillageGeometry::Other`] so that callers always get a
//! value back, whatever the input file contains.
//!
//! [`center::resolve_center`] reduces a geometry to the single coordinate
//! pair shown in the table.

pub mod center;

use std::fmt;

use geojson::{Geometry, Position};
use serde::{Deserialize, Serialize};

pub use center::resolve_center;

/// Default location used when a geometry has no usable center.
pub const DEFAULT_FALLBACK_CENTER: Center =
    Center([-8.236_436_279_372_697, 115.097_154_381_906_44]);

/// A two-element coordinate pair.
///
/// The axis order depends on where the pair came from: Point and
/// `LineString` centers are `[lon, lat]`, Polygon centers follow
/// [`AxisOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Center(pub [f64; 2]);

impl Center {
    /// Creates a pair from its two ordinates, in storage order.
    #[must_use]
    pub const fn new(first: f64, second: f64) -> Self {
        Self([first, second])
    }

    /// First ordinate as stored.
    #[must_use]
    pub const fn first(&self) -> f64 {
        self.0[0]
    }

    /// Second ordinate as stored.
    #[must_use]
    pub const fn second(&self) -> f64 {
        self.0[1]
    }
}

impl Default for Center {
    fn default() -> Self {
        DEFAULT_FALLBACK_CENTER
    }
}

/// Renders as `[a,b]`, the way the table shows it.
impl fmt::Display for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0[0], self.0[1])
    }
}

/// Output order for Polygon centers.
///
/// The village table has always shown Polygon centers as
/// `[lat, lon]` while Point and `LineString` centers are `[lon, lat]`.
/// [`AxisOrder::LatLon`] keeps that output; [`AxisOrder::LonLat`] makes
/// Polygons consistent with the other shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// `[meanLatitude, meanLongitude]`.
    #[default]
    LatLon,
    /// `[meanLongitude, meanLatitude]`.
    LonLat,
}

/// Tunables for [`resolve_center`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterOptions {
    /// Pair returned for unsupported or degenerate geometries.
    pub fallback: Center,
    /// Output order for Polygon centers.
    pub polygon_axis_order: AxisOrder,
}

/// A village boundary geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum VillageGeometry {
    /// A single `[lon, lat, ...]` position.
    Point(Position),
    /// Ordered vertices.
    LineString(Vec<Position>),
    /// Rings; the first is the outer boundary, the rest are holes.
    Polygon(Vec<Vec<Position>>),
    /// Any other `type` tag, including a missing one.
    Other {
        /// The `type` tag as found in the input.
        kind: String,
    },
    /// A recognized `type` tag whose coordinates could not be read.
    Invalid {
        /// The `type` tag as found in the input.
        kind: String,
        /// Parser message.
        reason: String,
    },
}

impl VillageGeometry {
    /// Classifies a raw `GeoJSON` geometry object.
    ///
    /// Never fails: unknown tags become [`Self::Other`] and unreadable
    /// coordinates become [`Self::Invalid`].
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        if !matches!(kind.as_str(), "Point" | "LineString" | "Polygon") {
            return Self::Other { kind };
        }

        match Geometry::from_json_value(value.clone()) {
            Ok(geometry) => match geometry.value {
                geojson::Value::Point(position) => Self::Point(position),
                geojson::Value::LineString(vertices) => Self::LineString(vertices),
                geojson::Value::Polygon(rings) => Self::Polygon(rings),
                _ => Self::Other { kind },
            },
            Err(e) => Self::Invalid {
                kind,
                reason: e.to_string(),
            },
        }
    }

    /// The `type` tag this geometry was parsed from.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::Polygon(_) => "Polygon",
            Self::Other { kind } | Self::Invalid { kind, .. } => kind,
        }
    }
}
