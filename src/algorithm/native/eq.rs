use std::sync::Arc;

use arrow_array::{Array, ArrayRef, BooleanArray, Scalar};
use arrow_schema::DataType;
use geo::Geometry;

use crate::array::GeometryArray;
use crate::datatypes::DTypeKind;
use crate::error::Result;
use crate::scalar::Value;

/// Element-wise structural equality against one geometry. Null slots compare false.
pub fn eq_geometry(array: &GeometryArray, rhs: &Geometry) -> BooleanArray {
    array
        .iter()
        .map(|g| Some(g.is_some_and(|g| g == rhs)))
        .collect()
}

/// Element-wise equality against any value.
///
/// Comparing geometries with a non-geometry value never fails; it is false everywhere.
pub fn eq_value(array: &GeometryArray, rhs: &Value) -> BooleanArray {
    match rhs {
        Value::Geometry(g) => eq_geometry(array, g),
        _ => BooleanArray::from(vec![false; array.len()]),
    }
}

/// Element-wise equality of an Arrow array against a value.
///
/// Numbers compare across integer and float types, text with text, booleans with booleans.
/// Every other pairing is false everywhere. Null slots compare false.
pub fn eq_arrow(array: &ArrayRef, rhs: &Value) -> Result<BooleanArray> {
    let all_false = || BooleanArray::from(vec![false; array.len()]);

    let kind = DTypeKind::from_arrow(array.data_type());
    let target = match (kind, rhs) {
        (DTypeKind::Number, Value::Int64(_)) if array.data_type().is_integer() => DataType::Int64,
        (DTypeKind::Number, Value::Int64(_) | Value::Float64(_)) => DataType::Float64,
        (DTypeKind::String, Value::Utf8(_)) => DataType::Utf8,
        (DTypeKind::Boolean, Value::Boolean(_)) => DataType::Boolean,
        _ => return Ok(all_false()),
    };

    let lhs: ArrayRef = if array.data_type() == &target {
        array.clone()
    } else {
        arrow_cast::cast(array.as_ref(), &target)?
    };
    let rhs = arrow_cast::cast(rhs.to_arrow(1)?.as_ref(), &target)?;
    let result = arrow_ord::cmp::eq(&lhs, &Scalar::new(Arc::clone(&rhs)))?;

    Ok(result.iter().map(|v| Some(v.unwrap_or(false))).collect())
}
