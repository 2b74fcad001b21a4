use arrow_array::{Array, ArrayRef, BooleanArray};

use crate::array::{GeometryArray, GeometryBuilder};
use crate::error::{GeoFrameError, Result};

/// Keep the elements where `predicate` is true. Null predicate slots drop the element.
pub trait Filter {
    type Output;

    fn filter(&self, predicate: &BooleanArray) -> Self::Output;
}

impl Filter for GeometryArray {
    type Output = Result<Self>;

    fn filter(&self, predicate: &BooleanArray) -> Self::Output {
        if predicate.len() != self.len() {
            return Err(GeoFrameError::LengthMismatch {
                expected: self.len(),
                actual: predicate.len(),
            });
        }

        let mut builder = GeometryBuilder::with_capacity(predicate.true_count());
        for (geom, keep) in self.iter().zip(predicate.iter()) {
            if keep == Some(true) {
                builder.push_geometry(geom.cloned());
            }
        }
        Ok(builder.finish())
    }
}

pub fn filter_arrow(array: &ArrayRef, predicate: &BooleanArray) -> Result<ArrayRef> {
    if predicate.len() != array.len() {
        return Err(GeoFrameError::LengthMismatch {
            expected: array.len(),
            actual: predicate.len(),
        });
    }
    Ok(arrow_select::filter::filter(array.as_ref(), predicate)?)
}
