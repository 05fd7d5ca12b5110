//! Representative center point for a village geometry.
//!
//! The center is an approximation meant for display, not a geometric
//! centroid: `LineString`s pick a vertex by index and Polygons average the
//! vertices of their outer ring without area weighting.

use geojson::Position;

use crate::{AxisOrder, Center, CenterOptions, VillageGeometry};

/// Reduces a geometry to a single coordinate pair.
///
/// * Point: the position itself, `[lon, lat]`.
/// * `LineString`: the vertex at index `len / 2`.
/// * Polygon: the mean of the outer ring's vertices, in
///   [`CenterOptions::polygon_axis_order`] order. Holes are ignored and a
///   closing vertex is counted like any other.
///
/// Unsupported kinds and shapes without a usable vertex log a warning and
/// return [`CenterOptions::fallback`].
#[must_use]
pub fn resolve_center(geometry: &VillageGeometry, options: &CenterOptions) -> Center {
    let center = match geometry {
        VillageGeometry::Point(position) => pair(position),
        VillageGeometry::LineString(vertices) => middle_vertex(vertices),
        VillageGeometry::Polygon(rings) => rings
            .first()
            .and_then(|ring| ring_mean(ring, options.polygon_axis_order)),
        VillageGeometry::Other { kind } => {
            log::warn!("Unsupported geometry type: {kind}");
            return options.fallback;
        }
        VillageGeometry::Invalid { kind, reason } => {
            log::warn!("Unreadable {kind} geometry: {reason}");
            return options.fallback;
        }
    };

    center.unwrap_or_else(|| {
        log::warn!("{} geometry has no usable vertex", geometry.kind());
        options.fallback
    })
}

fn pair(position: &Position) -> Option<Center> {
    match position.as_slice() {
        [first, second, ..] => Some(Center::new(*first, *second)),
        _ => None,
    }
}

fn middle_vertex(vertices: &[Position]) -> Option<Center> {
    vertices.get(vertices.len() / 2).and_then(pair)
}

#[allow(clippy::cast_precision_loss)]
fn ring_mean(ring: &[Position], order: AxisOrder) -> Option<Center> {
    if ring.is_empty() {
        return None;
    }

    let mut sum_lon = 0.0;
    let mut sum_lat = 0.0;
    for vertex in ring {
        let vertex = pair(vertex)?;
        sum_lon += vertex.first();
        sum_lat += vertex.second();
    }

    let count = ring.len() as f64;
    let (lon, lat) = (sum_lon / count, sum_lat / count);

    Some(match order {
        AxisOrder::LatLon => Center::new(lat, lon),
        AxisOrder::LonLat => Center::new(lon, lat),
    })
}
