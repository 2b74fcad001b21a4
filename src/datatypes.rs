//! Coarse column type classification used for dtype selection and reductions.

use arrow_schema::DataType;
use serde::{Deserialize, Serialize};

/// The kind of values a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DTypeKind {
    /// Geometry values.
    Geometry,
    /// Integer and floating point values.
    Number,
    /// Booleans.
    Boolean,
    /// Text.
    String,
    /// Anything else Arrow can hold (dates, binary, nested types).
    Other,
}

impl DTypeKind {
    /// Classify an Arrow data type.
    pub fn from_arrow(data_type: &DataType) -> Self {
        if data_type.is_numeric() {
            return DTypeKind::Number;
        }
        match data_type {
            DataType::Boolean => DTypeKind::Boolean,
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => DTypeKind::String,
            _ => DTypeKind::Other,
        }
    }

    /// Whether this kind participates in numeric reductions such as `sum`.
    pub fn is_summable(&self) -> bool {
        matches!(self, DTypeKind::Number | DTypeKind::Boolean)
    }
}

/// The dtype name shown in display footers, matching the names users of labeled tables expect.
pub(crate) fn dtype_name(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Boolean => "bool",
        DataType::Int8 => "int8",
        DataType::Int16 => "int16",
        DataType::Int32 => "int32",
        DataType::Int64 => "int64",
        DataType::UInt8 => "uint8",
        DataType::UInt16 => "uint16",
        DataType::UInt32 => "uint32",
        DataType::UInt64 => "uint64",
        DataType::Float16 => "float16",
        DataType::Float32 => "float32",
        DataType::Float64 => "float64",
        _ => "object",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(DTypeKind::from_arrow(&DataType::Int64), DTypeKind::Number);
        assert_eq!(DTypeKind::from_arrow(&DataType::Float32), DTypeKind::Number);
        assert_eq!(DTypeKind::from_arrow(&DataType::Boolean), DTypeKind::Boolean);
        assert_eq!(DTypeKind::from_arrow(&DataType::Utf8), DTypeKind::String);
        assert_eq!(DTypeKind::from_arrow(&DataType::Binary), DTypeKind::Other);
        assert!(DTypeKind::Boolean.is_summable());
        assert!(!DTypeKind::Geometry.is_summable());
    }
}
