//! Normalizes raw `GeoJSON` features into [`VillageRecord`] values.
//!
//! Uses the configured [`VillageFieldMapping`] to pick the name, district,
//! and area properties. Records are not validated: a missing property
//! becomes empty text and every feature produces exactly one record.
//!
//! Geometry and non-string property text is written the way a browser's
//! `JSON.stringify` writes it: keys in source order, no whitespace, and
//! whole numbers without a fractional part (`115`, not `115.0`).

use std::fmt::Write as _;

use village_table_geometry::{CenterOptions, VillageGeometry, resolve_center};
use village_table_village_models::{VillageFieldMapping, VillageRecord};

/// Normalizes every feature, preserving order.
#[must_use]
pub fn normalize_features(
    features: &[serde_json::Value],
    fields: &VillageFieldMapping,
    center: &CenterOptions,
) -> Vec<VillageRecord> {
    features
        .iter()
        .map(|feature| normalize_feature(feature, fields, center))
        .collect()
}

/// Normalizes a single feature.
#[must_use]
pub fn normalize_feature(
    feature: &serde_json::Value,
    fields: &VillageFieldMapping,
    center: &CenterOptions,
) -> VillageRecord {
    let props = feature.get("properties");
    let property = |key: &str| {
        props
            .and_then(|props| props.get(key))
            .map(verbatim)
            .unwrap_or_default()
    };

    let geometry = feature
        .get("geometry")
        .unwrap_or(&serde_json::Value::Null);

    VillageRecord {
        name: property(&fields.name),
        district: property(&fields.district),
        area: property(&fields.area),
        center: resolve_center(&VillageGeometry::from_json(geometry), center),
        geometry: json_text(geometry),
    }
}

/// Text of a property value as it appears in the source.
///
/// Strings are taken without quotes, numbers keep their JSON form, and
/// `null` is empty.
fn verbatim(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => json_text(other),
    }
}

/// Compact JSON text of `value` with browser number formatting.
#[must_use]
pub fn json_text(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_json(&mut out, value);
    out
}

fn write_json(out: &mut String, value: &serde_json::Value) {
    match value {
        serde_json::Value::Number(n) => out.push_str(&number_text(n)),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(out, item);
            }
            out.push(']');
        }
        serde_json::Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write!(out, "{}:", serde_json::Value::from(key.as_str())).unwrap();
                write_json(out, item);
            }
            out.push('}');
        }
        scalar => write!(out, "{scalar}").unwrap(),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(x) if n.is_f64() => float_text(x),
        _ => n.to_string(),
    }
}

/// Shortest round-trip text of `x`, switching to exponent form outside
/// `[1e-6, 1e21)` like `Number.prototype.toString`.
fn float_text(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&x.abs()) {
        return format!("{x}");
    }
    let text = format!("{x:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => text,
    }
}
