//! Element-wise arithmetic against a scalar.

use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::types::{Float64Type, Int64Type};
use arrow_array::{Array, ArrayRef, Scalar};
use arrow_schema::DataType;
use serde::{Deserialize, Serialize};

use crate::datatypes::DTypeKind;
use crate::error::{GeoFrameError, Result};
use crate::scalar::Value;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
        }
    }
}

/// Apply `op` between every element of a numeric Arrow array and a numeric scalar.
///
/// Integer columns stay integer when the scalar is an integer, except for division which always
/// produces floats. Anything non-numeric on either side is an [`GeoFrameError::IncorrectType`].
pub fn arith_arrow(array: &ArrayRef, op: ArithmeticOp, rhs: &Value) -> Result<ArrayRef> {
    let kind = DTypeKind::from_arrow(array.data_type());
    if !kind.is_summable() {
        return Err(GeoFrameError::IncorrectType(
            format!(
                "unsupported operand types for {}: {} and {}",
                op.symbol(),
                array.data_type(),
                rhs.type_name()
            )
            .into(),
        ));
    }

    let integer_result =
        op != ArithmeticOp::Div && matches!(rhs, Value::Int64(_) | Value::Boolean(_))
            && (array.data_type().is_integer() || array.data_type() == &DataType::Boolean);
    let target = match rhs {
        Value::Int64(_) | Value::Float64(_) | Value::Boolean(_) if integer_result => {
            DataType::Int64
        }
        Value::Int64(_) | Value::Float64(_) | Value::Boolean(_) => DataType::Float64,
        _ => {
            return Err(GeoFrameError::IncorrectType(
                format!(
                    "unsupported operand types for {}: {} and {}",
                    op.symbol(),
                    array.data_type(),
                    rhs.type_name()
                )
                .into(),
            ))
        }
    };

    let lhs = arrow_cast::cast(array.as_ref(), &target)?;
    let rhs = arrow_cast::cast(rhs.to_arrow(1)?.as_ref(), &target)?;
    let rhs = Scalar::new(Arc::clone(&rhs));
    let out = match op {
        ArithmeticOp::Add => arrow_arith::numeric::add(&lhs, &rhs)?,
        ArithmeticOp::Sub => arrow_arith::numeric::sub(&lhs, &rhs)?,
        ArithmeticOp::Mul => arrow_arith::numeric::mul(&lhs, &rhs)?,
        ArithmeticOp::Div => arrow_arith::numeric::div(&lhs, &rhs)?,
    };
    Ok(out)
}

/// Sum of the non-null values of a numeric or boolean array.
///
/// Integer and boolean arrays sum to [`Value::Int64`], floating point arrays to
/// [`Value::Float64`]. An empty or all-null array sums to zero.
pub fn sum_arrow(array: &dyn Array) -> Result<Value> {
    let data_type = array.data_type();
    if !DTypeKind::from_arrow(data_type).is_summable() {
        return Err(GeoFrameError::IncorrectType(
            format!("cannot sum values of type {}", data_type).into(),
        ));
    }

    if data_type.is_integer() || data_type == &DataType::Boolean {
        let ints = arrow_cast::cast(array, &DataType::Int64)?;
        let total = arrow_arith::aggregate::sum(ints.as_primitive::<Int64Type>());
        Ok(Value::Int64(total.unwrap_or(0)))
    } else {
        let floats = arrow_cast::cast(array, &DataType::Float64)?;
        let total = arrow_arith::aggregate::sum(floats.as_primitive::<Float64Type>());
        Ok(Value::Float64(total.unwrap_or(0.0)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use arrow_array::{BooleanArray, Float64Array, Int64Array, StringArray};

    #[test]
    fn integer_arithmetic_stays_integer() {
        let arr: ArrayRef = Arc::new(Int64Array::from(vec![1, 2]));
        let out = arith_arrow(&arr, ArithmeticOp::Add, &Value::Int64(1)).unwrap();
        assert_eq!(out.as_primitive::<Int64Type>().values().to_vec(), vec![2, 3]);
    }

    #[test]
    fn division_is_float() {
        let arr: ArrayRef = Arc::new(Int64Array::from(vec![1, 2]));
        let out = arith_arrow(&arr, ArithmeticOp::Div, &Value::Int64(2)).unwrap();
        assert_eq!(
            out.as_primitive::<Float64Type>().values().to_vec(),
            vec![0.5, 1.0]
        );
    }

    #[test]
    fn text_is_rejected() {
        let arr: ArrayRef = Arc::new(StringArray::from(vec!["a"]));
        assert!(matches!(
            arith_arrow(&arr, ArithmeticOp::Add, &Value::Int64(1)),
            Err(GeoFrameError::IncorrectType(_))
        ));
        let arr: ArrayRef = Arc::new(Int64Array::from(vec![1]));
        assert!(matches!(
            arith_arrow(&arr, ArithmeticOp::Mul, &Value::from("x")),
            Err(GeoFrameError::IncorrectType(_))
        ));
    }

    #[test]
    fn sums() {
        let ints = Int64Array::from(vec![Some(1), None, Some(2)]);
        assert_eq!(sum_arrow(&ints).unwrap(), Value::Int64(3));
        let bools = BooleanArray::from(vec![true, true, false]);
        assert_eq!(sum_arrow(&bools).unwrap(), Value::Int64(2));
        let floats = Float64Array::from(vec![0.5, 1.0]);
        assert_eq!(sum_arrow(&floats).unwrap(), Value::Float64(1.5));
        let empty = Float64Array::new_null(2);
        assert_eq!(sum_arrow(&empty).unwrap(), Value::Float64(0.0));
        assert!(sum_arrow(&StringArray::from(vec!["a"])).is_err());
    }
}
