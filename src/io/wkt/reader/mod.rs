use std::str::FromStr;

use arrow_array::{Array, GenericStringArray, OffsetSizeTrait};
use geo::Geometry;

use crate::array::{GeometryArray, GeometryBuilder};
use crate::error::{GeoFrameError, Result};

/// Parse a single well-known text string.
pub fn geometry_from_wkt(s: &str) -> Result<Geometry> {
    let wkt = wkt::Wkt::<f64>::from_str(s).map_err(|e| GeoFrameError::Wkt(e.to_string()))?;
    Geometry::try_from(wkt).map_err(|e| GeoFrameError::Wkt(e.to_string()))
}

/// Parse a string array of well-known text into a [`GeometryArray`].
///
/// Null and empty strings become null geometries.
pub fn from_wkt<O: OffsetSizeTrait>(arr: &GenericStringArray<O>) -> Result<GeometryArray> {
    let mut builder = GeometryBuilder::with_capacity(arr.len());
    for wkt_str in arr.iter() {
        match wkt_str {
            Some(s) if !s.trim().is_empty() => builder.push_geometry(Some(geometry_from_wkt(s)?)),
            _ => builder.push_null(),
        }
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod test {
    use arrow_array::StringArray;
    use geo::{line_string, point};

    use super::*;

    #[test]
    fn test_read_wkt() {
        let arr = StringArray::from(vec![
            Some("POINT (30 10)"),
            None,
            Some(""),
            Some("LINESTRING (30 10, 10 30)"),
        ]);
        let parsed = from_wkt(&arr).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed.null_count(), 2);
        assert_eq!(
            parsed.get(0),
            Some(&Geometry::Point(point!(x: 30.0, y: 10.0)))
        );
        assert_eq!(
            parsed.get(3),
            Some(&Geometry::LineString(
                line_string![(x: 30.0, y: 10.0), (x: 10.0, y: 30.0)]
            ))
        );
    }

    #[test]
    fn invalid_wkt() {
        assert!(matches!(
            geometry_from_wkt("POINT (1"),
            Err(GeoFrameError::Wkt(_))
        ));
    }
}
