use std::ops::Range;

use arrow_array::{ArrayRef, UInt64Array};

use crate::array::{GeometryArray, GeometryBuilder};
use crate::error::{GeoFrameError, Result};

/// Take elements by index from Array, creating a new Array from those indexes.
///
/// A null index produces a null element.
pub trait Take {
    type Output;

    fn take(&self, indices: &UInt64Array) -> Self::Output;

    fn take_range(&self, range: &Range<usize>) -> Self::Output;
}

impl Take for GeometryArray {
    type Output = Result<Self>;

    fn take(&self, indices: &UInt64Array) -> Self::Output {
        let mut builder = GeometryBuilder::with_capacity(indices.len());
        for index in indices.iter() {
            if let Some(index) = index {
                let geom = self.try_get(index as usize)?;
                builder.push_geometry(geom.cloned());
            } else {
                builder.push_null();
            }
        }

        Ok(builder.finish())
    }

    fn take_range(&self, range: &Range<usize>) -> Self::Output {
        if range.end > self.len() || range.start > range.end {
            return Err(GeoFrameError::IndexOutOfBounds {
                index: range.end,
                len: self.len(),
            });
        }
        Ok(self.slice(range.start, range.len()))
    }
}

/// Take from an Arrow array, with null indices producing nulls.
pub fn take_arrow(array: &ArrayRef, indices: &UInt64Array) -> Result<ArrayRef> {
    Ok(arrow_select::take::take(array.as_ref(), indices, None)?)
}

pub fn positions_to_indices(positions: &[usize]) -> UInt64Array {
    positions.iter().map(|&p| p as u64).collect::<Vec<_>>().into()
}

pub fn optional_positions_to_indices(positions: &[Option<usize>]) -> UInt64Array {
    positions.iter().map(|p| p.map(|p| p as u64)).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::point;
    use arrow_array::cast::AsArray;
    use arrow_array::types::Int64Type;
    use arrow_array::{Array, Int64Array};
    use std::sync::Arc;

    #[test]
    fn take_with_null_index() {
        let arr = point::array();
        let indices = optional_positions_to_indices(&[Some(2), None, Some(0)]);
        let taken = arr.take(&indices).unwrap();
        assert_eq!(
            taken,
            vec![Some(point::p(2.)), None, Some(point::p(0.))].into()
        );
    }

    #[test]
    fn take_out_of_bounds() {
        let arr = point::array();
        let indices = positions_to_indices(&[3]);
        assert!(matches!(
            arr.take(&indices),
            Err(GeoFrameError::IndexOutOfBounds { index: 3, len: 3 })
        ));
        assert!(arr.take_range(&(1..4)).is_err());
        assert_eq!(arr.take_range(&(1..3)).unwrap().len(), 2);
    }

    #[test]
    fn take_arrow_nulls() {
        let values: ArrayRef = Arc::new(Int64Array::from(vec![10, 20, 30]));
        let indices = optional_positions_to_indices(&[Some(1), None]);
        let taken = take_arrow(&values, &indices).unwrap();
        let taken = taken.as_primitive::<Int64Type>();
        assert_eq!(taken.value(0), 20);
        assert!(taken.is_null(1));
    }
}
