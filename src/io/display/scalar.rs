use geo::{Geometry, MapCoords};
use ryu::Buffer;

use crate::io::wkt::geometry_to_wkt;
use crate::scalar::Value;

/// WKT of `geom` with coordinates truncated to at most 3 decimal places.
pub(crate) fn truncated_wkt(geom: &Geometry) -> String {
    let truncated = geom.map_coords(|geo::Coord { x, y }| geo::Coord {
        x: (x * 1000.0).round() / 1000.0,
        y: (y * 1000.0).round() / 1000.0,
    });
    geometry_to_wkt(&truncated)
}

/// Text of a single cell as shown in series and frame output.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Boolean(true) => "True".to_string(),
        Value::Boolean(false) => "False".to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) if v.is_nan() => "NaN".to_string(),
        Value::Float64(v) if v.is_infinite() && *v > 0.0 => "inf".to_string(),
        Value::Float64(v) if v.is_infinite() => "-inf".to_string(),
        Value::Float64(v) => Buffer::new().format_finite(*v).to_string(),
        Value::Utf8(v) => v.clone(),
        Value::Geometry(g) => geometry_to_wkt(g),
    }
}

/// Like [`format_value`], but nulls in non-geometry columns read `NaN`.
pub(crate) fn format_cell(value: &Value, geometry: bool) -> String {
    match value {
        Value::Null if !geometry => "NaN".to_string(),
        v => format_value(v),
    }
}
