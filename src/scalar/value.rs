use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::types::{Float64Type, Int64Type};
use arrow_array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow_schema::DataType;
use geo::Geometry;

use crate::error::{GeoFrameError, Result};

/// A single table cell.
///
/// Integer Arrow types read back as [`Value::Int64`], floating point types as
/// [`Value::Float64`] and text types as [`Value::Utf8`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Utf8(String),
    Geometry(Geometry),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Value::Geometry(g) => Some(g),
            _ => None,
        }
    }

    /// Convert into a nullable geometry, failing for any non-geometry value.
    pub fn into_geometry(self) -> Result<Option<Geometry>> {
        match self {
            Value::Null => Ok(None),
            Value::Geometry(g) => Ok(Some(g)),
            other => Err(GeoFrameError::IncorrectType(
                format!("cannot store {} in a geometry column", other.type_name()).into(),
            )),
        }
    }

    /// A short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "bool",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::Utf8(_) => "str",
            Value::Geometry(_) => "geometry",
        }
    }

    /// Repeat this value `len` times as an Arrow array.
    ///
    /// Nulls broadcast to an all-null `Float64` array.
    pub fn to_arrow(&self, len: usize) -> Result<ArrayRef> {
        let array: ArrayRef = match self {
            Value::Null => Arc::new(Float64Array::new_null(len)),
            Value::Boolean(v) => Arc::new(BooleanArray::from(vec![*v; len])),
            Value::Int64(v) => Arc::new(Int64Array::from_value(*v, len)),
            Value::Float64(v) => Arc::new(Float64Array::from_value(*v, len)),
            Value::Utf8(v) => Arc::new(StringArray::from_iter_values(std::iter::repeat(v).take(len))),
            Value::Geometry(_) => {
                return Err(GeoFrameError::IncorrectType(
                    "geometries cannot be stored in an Arrow column".into(),
                ))
            }
        };
        Ok(array)
    }

    /// Read slot `i` of an Arrow array.
    pub fn from_arrow(array: &dyn Array, i: usize) -> Result<Self> {
        if i >= array.len() {
            return Err(GeoFrameError::IndexOutOfBounds {
                index: i,
                len: array.len(),
            });
        }
        if array.logical_nulls().is_some_and(|nulls| nulls.is_null(i)) {
            return Ok(Value::Null);
        }

        let data_type = array.data_type();
        let value = match data_type {
            DataType::Boolean => Value::Boolean(array.as_boolean().value(i)),
            DataType::Int64 => Value::Int64(array.as_primitive::<Int64Type>().value(i)),
            DataType::Float64 => Value::Float64(array.as_primitive::<Float64Type>().value(i)),
            DataType::Utf8 => Value::Utf8(array.as_string::<i32>().value(i).to_string()),
            DataType::LargeUtf8 => Value::Utf8(array.as_string::<i64>().value(i).to_string()),
            dt if dt.is_integer() => {
                let single = arrow_cast::cast(&array.slice(i, 1), &DataType::Int64)?;
                Value::Int64(single.as_primitive::<Int64Type>().value(0))
            }
            dt if dt.is_floating() => {
                let single = arrow_cast::cast(&array.slice(i, 1), &DataType::Float64)?;
                Value::Float64(single.as_primitive::<Float64Type>().value(0))
            }
            _ => {
                let single = arrow_cast::cast(&array.slice(i, 1), &DataType::Utf8)?;
                Value::Utf8(single.as_string::<i32>().value(0).to_string())
            }
        };
        Ok(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int64(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Utf8(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Utf8(value)
    }
}

impl From<Geometry> for Value {
    fn from(value: Geometry) -> Self {
        Value::Geometry(value)
    }
}

impl From<geo::Point> for Value {
    fn from(value: geo::Point) -> Self {
        Value::Geometry(value.into())
    }
}

impl From<Option<Geometry>> for Value {
    fn from(value: Option<Geometry>) -> Self {
        value.map(Value::Geometry).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use arrow_array::Int32Array;
    use geo::point;

    #[test]
    fn read_arrow_slots() {
        let ints = Int32Array::from(vec![Some(4), None]);
        assert_eq!(Value::from_arrow(&ints, 0).unwrap(), Value::Int64(4));
        assert_eq!(Value::from_arrow(&ints, 1).unwrap(), Value::Null);
        assert!(matches!(
            Value::from_arrow(&ints, 2),
            Err(GeoFrameError::IndexOutOfBounds { index: 2, len: 2 })
        ));

        let strings = StringArray::from(vec!["a"]);
        assert_eq!(Value::from_arrow(&strings, 0).unwrap(), Value::from("a"));
    }

    #[test]
    fn null_type_slots_read_as_null() {
        let nulls = arrow_array::NullArray::new(2);
        assert_eq!(Value::from_arrow(&nulls, 1).unwrap(), Value::Null);
    }

    #[test]
    fn broadcast() {
        let arr = Value::Int64(1).to_arrow(3).unwrap();
        assert_eq!(arr.as_primitive::<Int64Type>().values().to_vec(), vec![1, 1, 1]);

        let nulls = Value::Null.to_arrow(2).unwrap();
        assert_eq!(nulls.null_count(), 2);

        assert!(Value::from(point!(x: 0., y: 0.)).to_arrow(1).is_err());
    }

    #[test]
    fn into_geometry() {
        assert_eq!(Value::Null.into_geometry().unwrap(), None);
        assert!(matches!(
            Value::Int64(1).into_geometry(),
            Err(GeoFrameError::IncorrectType(_))
        ));
    }
}
