use arrow_array::{new_null_array, Array, ArrayRef};
use arrow_cast::{cast_with_options, CastOptions};

use crate::error::{GeoFrameError, Result};
use crate::scalar::Value;

/// Return a copy of `array` with slot `i` replaced by `value`.
///
/// The value is cast to the array's type. Casts that would lose the value (text that does not
/// parse as a number, out of range integers) fail instead of writing a null.
pub fn replace_arrow_value(array: &ArrayRef, i: usize, value: &Value) -> Result<ArrayRef> {
    let len = array.len();
    if i >= len {
        return Err(GeoFrameError::IndexOutOfBounds { index: i, len });
    }

    let replacement = match value {
        Value::Null => new_null_array(array.data_type(), 1),
        Value::Geometry(_) => {
            return Err(GeoFrameError::IncorrectType(
                "cannot store a geometry in a non-geometry column".into(),
            ))
        }
        v => {
            let options = CastOptions {
                safe: false,
                ..Default::default()
            };
            cast_with_options(v.to_arrow(1)?.as_ref(), array.data_type(), &options)?
        }
    };

    let head = array.slice(0, i);
    let tail = array.slice(i + 1, len - i - 1);
    Ok(arrow_select::concat::concat(&[
        head.as_ref(),
        replacement.as_ref(),
        tail.as_ref(),
    ])?)
}

#[cfg(test)]
mod test {
    use super::*;
    use arrow_array::cast::AsArray;
    use arrow_array::types::Int64Type;
    use arrow_array::Int64Array;
    use geo::point;
    use std::sync::Arc;

    #[test]
    fn replace_middle() {
        let arr: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
        let out = replace_arrow_value(&arr, 1, &Value::Int64(20)).unwrap();
        assert_eq!(out.as_primitive::<Int64Type>().values().to_vec(), vec![1, 20, 3]);

        let out = replace_arrow_value(&arr, 2, &Value::Null).unwrap();
        assert!(out.is_null(2));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn replace_rejects_bad_values() {
        let arr: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
        assert!(replace_arrow_value(&arr, 0, &Value::from("abc")).is_err());
        assert!(matches!(
            replace_arrow_value(&arr, 0, &Value::from(point!(x: 0., y: 0.))),
            Err(GeoFrameError::IncorrectType(_))
        ));
        assert!(matches!(
            replace_arrow_value(&arr, 3, &Value::Int64(0)),
            Err(GeoFrameError::IndexOutOfBounds { .. })
        ));
    }
}
