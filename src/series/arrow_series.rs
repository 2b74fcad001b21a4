use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::{Array, ArrayRef, BooleanArray};
use arrow_schema::DataType;

use crate::error::{GeoFrameError, Result};
use crate::index::Index;
use crate::scalar::{Label, Value};

/// A labeled one-dimensional Arrow array.
///
/// This is what null checks, comparisons, text casts and frame reductions return.
#[derive(Debug, Clone)]
pub struct Series {
    pub(crate) name: Option<String>,
    pub(crate) index: Index,
    pub(crate) values: ArrayRef,
}

impl Series {
    /// Wrap `values` with a default `0..len` index.
    pub fn new(values: ArrayRef) -> Self {
        Self {
            name: None,
            index: Index::range(values.len()),
            values,
        }
    }

    pub fn try_new(index: Index, values: ArrayRef, name: Option<String>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(GeoFrameError::LengthMismatch {
                expected: values.len(),
                actual: index.len(),
            });
        }
        Ok(Self {
            name,
            index,
            values,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_index(self, index: Index) -> Result<Self> {
        Self::try_new(index, self.values, self.name)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn values(&self) -> &ArrayRef {
        &self.values
    }

    pub fn data_type(&self) -> &DataType {
        self.values.data_type()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at position `pos`.
    pub fn value(&self, pos: usize) -> Result<Value> {
        Value::from_arrow(self.values.as_ref(), pos)
    }

    /// Value at the first occurrence of `label`.
    pub fn get(&self, label: impl Into<Label>) -> Result<Value> {
        let pos = self.index.try_get_loc(&label.into())?;
        self.value(pos)
    }

    pub fn to_values(&self) -> Result<Vec<Value>> {
        (0..self.len()).map(|i| self.value(i)).collect()
    }

    /// The values as a boolean array, if this is a boolean series.
    pub fn as_boolean(&self) -> Option<&BooleanArray> {
        self.values.as_boolean_opt()
    }

    /// Boolean negation. Fails for non-boolean series.
    pub fn not(&self) -> Result<Self> {
        let values = self.as_boolean().ok_or_else(|| {
            GeoFrameError::IncorrectType(
                format!("cannot negate a series of type {}", self.data_type()).into(),
            )
        })?;
        let negated = arrow_arith::boolean::not(values)?;
        Ok(Self {
            name: self.name.clone(),
            index: self.index.clone(),
            values: Arc::new(negated),
        })
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.index == other.index
            && self.values.to_data() == other.values.to_data()
    }
}
