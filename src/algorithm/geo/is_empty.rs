use arrow_array::BooleanArray;
use geo::dimensions::HasDimensions;

use crate::array::GeometryArray;

/// Whether each geometry is empty. Null slots are reported as not empty.
pub trait IsEmpty {
    type Output;

    fn is_empty_geometry(&self) -> Self::Output;
}

impl IsEmpty for GeometryArray {
    type Output = BooleanArray;

    fn is_empty_geometry(&self) -> Self::Output {
        self.iter()
            .map(|maybe_g| Some(maybe_g.map(|g| g.is_empty()).unwrap_or(false)))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::{Geometry, LineString, point};

    #[test]
    fn nulls_are_not_empty() {
        let arr = GeometryArray::new(vec![
            Some(point!(x: 0., y: 0.).into()),
            None,
            Some(Geometry::LineString(LineString::<f64>::new(vec![]))),
        ]);
        assert_eq!(
            arr.is_empty_geometry(),
            BooleanArray::from(vec![false, false, true])
        );
    }
}
