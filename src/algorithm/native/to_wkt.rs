use arrow_array::builder::StringBuilder;
use arrow_array::StringArray;

use crate::array::GeometryArray;
use crate::io::wkt::write_geometry;

/// Converts the input to WKT representation.
pub trait ToWKT {
    type Output;

    fn to_wkt(&self) -> Self::Output;
}

impl ToWKT for GeometryArray {
    type Output = StringArray;

    fn to_wkt(&self) -> Self::Output {
        let mut wkt_builder = StringBuilder::with_capacity(self.len(), self.len() * 16);
        let mut buffer = String::new();

        for item in self.iter() {
            match item {
                Some(geom) => {
                    buffer.clear();
                    write_geometry(geom, &mut buffer).expect("writing to a String cannot fail");
                    wkt_builder.append_value(&buffer);
                }
                None => wkt_builder.append_null(),
            }
        }

        wkt_builder.finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::point;

    #[test]
    fn nulls_stay_null() {
        let arr = point::nullable_array();
        let wkt = arr.to_wkt();
        assert_eq!(
            wkt,
            StringArray::from(vec![Some("POINT (0 0)"), None, Some("POINT (2 2)")])
        );
    }
}
