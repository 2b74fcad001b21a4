use arrow_array::BooleanArray;
use arrow_buffer::{NullBuffer, NullBufferBuilder};
use geo::Geometry;

use crate::array::GeometryBuilder;
use crate::error::{GeoFrameError, Result};

/// An array of nullable geometries of any type.
///
/// This is semantically equivalent to `Vec<Option<Geometry>>`. Unlike Arrow arrays it supports
/// in-place writes through [`GeometryArray::set`], which is what element assignment on series and
/// frames goes through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryArray {
    pub(crate) values: Vec<Option<Geometry>>,
}

impl GeometryArray {
    /// Create a new GeometryArray from nullable geometries.
    pub fn new(values: Vec<Option<Geometry>>) -> Self {
        Self { values }
    }

    /// An array of `len` nulls.
    pub fn new_null(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Returns whether slot `i` is null.
    /// # Panic
    /// Panics iff `i >= self.len()`.
    #[inline]
    pub fn is_null(&self, i: usize) -> bool {
        self.values[i].is_none()
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        !self.is_null(i)
    }

    /// Access the value at slot `i`, `None` for null slots or out of bounds access.
    pub fn get(&self, i: usize) -> Option<&Geometry> {
        self.values.get(i).and_then(|v| v.as_ref())
    }

    /// Access the value at slot `i`, failing when `i` is out of bounds.
    pub fn try_get(&self, i: usize) -> Result<Option<&Geometry>> {
        self.values
            .get(i)
            .map(|v| v.as_ref())
            .ok_or(GeoFrameError::IndexOutOfBounds {
                index: i,
                len: self.len(),
            })
    }

    /// Overwrite slot `i`.
    pub fn set(&mut self, i: usize, value: Option<Geometry>) -> Result<()> {
        let len = self.len();
        let slot = self
            .values
            .get_mut(i)
            .ok_or(GeoFrameError::IndexOutOfBounds { index: i, len })?;
        *slot = value;
        Ok(())
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<&Geometry>> + '_ {
        self.values.iter().map(|v| v.as_ref())
    }

    /// Iterate over the non-null geometries only.
    pub fn iter_valid(&self) -> impl Iterator<Item = &Geometry> + '_ {
        self.values.iter().flatten()
    }

    pub fn into_inner(self) -> Vec<Option<Geometry>> {
        self.values
    }

    /// The validity of this array as an Arrow null buffer, `None` if there are no nulls.
    pub fn nulls(&self) -> Option<NullBuffer> {
        let mut builder = NullBufferBuilder::new(self.len());
        for v in self.values.iter() {
            builder.append(v.is_some());
        }
        builder.finish()
    }

    /// Boolean array that is `true` wherever a slot is null. Never itself null.
    pub fn is_na(&self) -> BooleanArray {
        self.values.iter().map(|v| Some(v.is_none())).collect()
    }

    /// Slices this array.
    /// # Panic
    /// This function panics iff `offset + length > self.len()`.
    pub fn slice(&self, offset: usize, length: usize) -> Self {
        assert!(
            offset + length <= self.len(),
            "offset + length may not exceed length of array"
        );
        Self {
            values: self.values[offset..offset + length].to_vec(),
        }
    }

    /// Concatenate several arrays end to end.
    pub fn concat(arrays: &[&GeometryArray]) -> Self {
        let capacity = arrays.iter().map(|a| a.len()).sum();
        let mut builder = GeometryBuilder::with_capacity(capacity);
        for array in arrays {
            for geom in array.iter() {
                builder.push_geometry(geom.cloned());
            }
        }
        builder.finish()
    }

    /// Replace every null slot with `value`.
    pub fn fill_null(&self, value: &Geometry) -> Self {
        self.values
            .iter()
            .map(|v| Some(v.clone().unwrap_or_else(|| value.clone())))
            .collect()
    }
}

impl From<Vec<Option<Geometry>>> for GeometryArray {
    fn from(value: Vec<Option<Geometry>>) -> Self {
        Self::new(value)
    }
}

impl From<Vec<Geometry>> for GeometryArray {
    fn from(value: Vec<Geometry>) -> Self {
        value.into_iter().map(Some).collect()
    }
}

impl From<Vec<geo::Point>> for GeometryArray {
    fn from(value: Vec<geo::Point>) -> Self {
        value.into_iter().map(|p| Some(Geometry::Point(p))).collect()
    }
}

impl From<Vec<Option<geo::Point>>> for GeometryArray {
    fn from(value: Vec<Option<geo::Point>>) -> Self {
        value.into_iter().map(|p| p.map(Geometry::Point)).collect()
    }
}

impl FromIterator<Option<Geometry>> for GeometryArray {
    fn from_iter<T: IntoIterator<Item = Option<Geometry>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
