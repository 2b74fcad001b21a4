use std::ops::Range;
use std::sync::Arc;

use arrow_array::{Array, ArrayRef, BooleanArray, UInt64Array};
use arrow_schema::DataType;

use crate::algorithm::native::{filter_arrow, replace_arrow_value, take_arrow, Filter, Take};
use crate::array::GeometryArray;
use crate::datatypes::{dtype_name, DTypeKind};
use crate::error::{GeoFrameError, Result};
use crate::scalar::Value;

/// One column of a [`GeoDataFrame`](crate::frame::GeoDataFrame).
///
/// Geometries live in a [`GeometryArray`]; every other type is an Arrow array.
#[derive(Debug, Clone)]
pub enum Column {
    Geometry(GeometryArray),
    Arrow(ArrayRef),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Geometry(arr) => arr.len(),
            Column::Arrow(arr) => arr.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> DTypeKind {
        match self {
            Column::Geometry(_) => DTypeKind::Geometry,
            Column::Arrow(arr) => DTypeKind::from_arrow(arr.data_type()),
        }
    }

    pub fn is_geometry(&self) -> bool {
        matches!(self, Column::Geometry(_))
    }

    pub fn as_geometry(&self) -> Option<&GeometryArray> {
        match self {
            Column::Geometry(arr) => Some(arr),
            Column::Arrow(_) => None,
        }
    }

    pub fn as_arrow(&self) -> Option<&ArrayRef> {
        match self {
            Column::Geometry(_) => None,
            Column::Arrow(arr) => Some(arr),
        }
    }

    /// Name of the column's dtype as shown in display output.
    pub fn dtype_name(&self) -> &'static str {
        match self {
            Column::Geometry(_) => "geometry",
            Column::Arrow(arr) => dtype_name(arr.data_type()),
        }
    }

    /// Number of null slots. Arrow columns count logical nulls, so an all-null `Null` column
    /// counts every row.
    pub fn null_count(&self) -> usize {
        match self {
            Column::Geometry(arr) => arr.null_count(),
            Column::Arrow(arr) => arr.logical_nulls().map_or(0, |nulls| nulls.null_count()),
        }
    }

    pub fn is_null(&self, i: usize) -> bool {
        match self {
            Column::Geometry(arr) => arr.is_null(i),
            Column::Arrow(arr) => arr.logical_nulls().is_some_and(|nulls| nulls.is_null(i)),
        }
    }

    /// `true` wherever a slot is null.
    pub fn is_na(&self) -> Result<BooleanArray> {
        match self {
            Column::Geometry(arr) => Ok(arr.is_na()),
            Column::Arrow(arr) => Ok(arrow_arith::boolean::is_null(arr.as_ref())?),
        }
    }

    /// The cell at position `i`.
    pub fn value(&self, i: usize) -> Result<Value> {
        match self {
            Column::Geometry(arr) => Ok(arr
                .try_get(i)?
                .map_or(Value::Null, |g| Value::Geometry(g.clone()))),
            Column::Arrow(arr) => Value::from_arrow(arr.as_ref(), i),
        }
    }

    /// Overwrite the cell at position `i`.
    ///
    /// Geometry columns only accept geometries and nulls. Arrow columns cast the value to the
    /// column's type.
    pub fn set(&mut self, i: usize, value: Value) -> Result<()> {
        match self {
            Column::Geometry(arr) => arr.set(i, value.into_geometry()?),
            Column::Arrow(arr) => {
                *arr = replace_arrow_value(arr, i, &value)?;
                Ok(())
            }
        }
    }

    pub fn take(&self, indices: &UInt64Array) -> Result<Self> {
        match self {
            Column::Geometry(arr) => Ok(Column::Geometry(arr.take(indices)?)),
            Column::Arrow(arr) => Ok(Column::Arrow(take_arrow(arr, indices)?)),
        }
    }

    pub fn filter(&self, predicate: &BooleanArray) -> Result<Self> {
        match self {
            Column::Geometry(arr) => Ok(Column::Geometry(arr.filter(predicate)?)),
            Column::Arrow(arr) => Ok(Column::Arrow(filter_arrow(arr, predicate)?)),
        }
    }

    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        if range.end > self.len() || range.start > range.end {
            return Err(GeoFrameError::IndexOutOfBounds {
                index: range.end,
                len: self.len(),
            });
        }
        match self {
            Column::Geometry(arr) => Ok(Column::Geometry(arr.take_range(&range)?)),
            Column::Arrow(arr) => Ok(Column::Arrow(arr.slice(range.start, range.len()))),
        }
    }

    /// An all-null column of `len` rows with the same type as this one.
    pub fn new_null_like(&self, len: usize) -> Self {
        match self {
            Column::Geometry(_) => Column::Geometry(GeometryArray::new_null(len)),
            Column::Arrow(arr) => Column::Arrow(arrow_array::new_null_array(arr.data_type(), len)),
        }
    }

    /// Broadcast a scalar into a column of `len` rows.
    pub fn broadcast(value: &Value, len: usize) -> Result<Self> {
        match value {
            Value::Geometry(g) => Ok(Column::Geometry(
                std::iter::repeat(Some(g.clone())).take(len).collect(),
            )),
            v => Ok(Column::Arrow(v.to_arrow(len)?)),
        }
    }

    /// An all-null `Float64` column, used for columns that did not exist before a reindex.
    pub(crate) fn missing(len: usize) -> Self {
        Column::Arrow(Arc::new(arrow_array::Float64Array::new_null(len)))
    }

    pub fn data_type(&self) -> Option<&DataType> {
        self.as_arrow().map(|arr| arr.data_type())
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Column::Geometry(a), Column::Geometry(b)) => a == b,
            (Column::Arrow(a), Column::Arrow(b)) => a.to_data() == b.to_data(),
            _ => false,
        }
    }
}

impl From<GeometryArray> for Column {
    fn from(value: GeometryArray) -> Self {
        Column::Geometry(value)
    }
}

impl From<ArrayRef> for Column {
    fn from(value: ArrayRef) -> Self {
        Column::Arrow(value)
    }
}
