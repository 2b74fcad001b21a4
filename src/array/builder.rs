use geo::Geometry;

use crate::array::GeometryArray;

/// A mutable collection of nullable geometries.
///
/// Converting a [`GeometryBuilder`] into a [`GeometryArray`] is `O(1)`.
#[derive(Debug, Default)]
pub struct GeometryBuilder {
    values: Vec<Option<Geometry>>,
}

impl GeometryBuilder {
    /// Creates a new empty [`GeometryBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`GeometryBuilder`] with a capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Reserves capacity for at least `additional` more geometries.
    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add a new geometry to the end of this array. `None` pushes a null.
    #[inline]
    pub fn push_geometry(&mut self, value: Option<Geometry>) {
        self.values.push(value);
    }

    /// Push a null to the end of this array.
    #[inline]
    pub fn push_null(&mut self) {
        self.values.push(None);
    }

    /// Consume the builder and convert to an immutable [`GeometryArray`]
    pub fn finish(self) -> GeometryArray {
        GeometryArray::new(self.values)
    }
}

impl From<GeometryBuilder> for GeometryArray {
    fn from(value: GeometryBuilder) -> Self {
        value.finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::point;

    #[test]
    fn push_and_finish() {
        let mut builder = GeometryBuilder::with_capacity(2);
        builder.push_geometry(Some(point!(x: 1., y: 2.).into()));
        builder.push_null();
        assert_eq!(builder.len(), 2);

        let arr = builder.finish();
        assert_eq!(arr.null_count(), 1);
        assert_eq!(arr.get(0), Some(&Geometry::Point(point!(x: 1., y: 2.))));
    }
}
