use std::fmt;

use geo::Geometry;

use crate::array::GeometryArray;
use crate::io::display::scalar::truncated_wkt;

fn write_indented_geom(f: &mut fmt::Formatter<'_>, geom: Option<&Geometry>) -> fmt::Result {
    write!(f, "    ")?;
    if let Some(geom) = geom {
        writeln!(f, "<{}>,", truncated_wkt(geom))?;
    } else {
        writeln!(f, "null,")?;
    }

    Ok(())
}

fn write_indented_ellipsis(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "    ...,")
}

impl fmt::Display for GeometryArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GeometryArray([")?;

        if self.len() > 6 {
            for maybe_geom in self.iter().take(3) {
                write_indented_geom(f, maybe_geom)?;
            }
            write_indented_ellipsis(f)?;
            for maybe_geom in self.iter().skip(self.len() - 3) {
                write_indented_geom(f, maybe_geom)?;
            }
        } else {
            for maybe_geom in self.iter() {
                write_indented_geom(f, maybe_geom)?;
            }
        }
        write!(f, "])")?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::array::GeometryArray;
    use crate::test::point;

    #[test]
    fn test_display_geometry_array() {
        let result = point::nullable_array().to_string();
        let expected = "GeometryArray([
    <POINT (0 0)>,
    null,
    <POINT (2 2)>,
])";
        assert_eq!(result, expected);
    }

    #[test]
    fn test_display_long_array() {
        let array: GeometryArray = (0..8).map(|i| point::p(i as f64)).collect::<Vec<_>>().into();
        let result = array.to_string();
        let expected = "GeometryArray([
    <POINT (0 0)>,
    <POINT (1 1)>,
    <POINT (2 2)>,
    ...,
    <POINT (5 5)>,
    <POINT (6 6)>,
    <POINT (7 7)>,
])";
        assert_eq!(result, expected);
    }
}
