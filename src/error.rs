//! Defines [`GeoFrameError`], representing all errors returned by this crate.

use arrow_schema::ArrowError;
use std::borrow::Cow;
use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoFrameError {
    /// Incorrect type was passed to an operation.
    ///
    /// This is what arithmetic, ordering and numeric casts on geometries return.
    #[error("Incorrect type passed to operation: {0}")]
    IncorrectType(Cow<'static, str>),

    /// A row label was not found in the index.
    #[error("Label not found in index: {0}")]
    KeyError(String),

    /// A column name was not found in the frame.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A position was outside of `0..len`.
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two inputs that must line up row by row did not.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The frame has no active geometry column.
    #[error("No active geometry column")]
    NoActiveGeometry,

    /// General error.
    #[error("General error: {0}")]
    General(String),

    /// Failure to parse or convert well-known text.
    #[error("WKT error: {0}")]
    Wkt(String),

    /// [ArrowError]
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoFrameError>;

impl From<std::fmt::Error> for GeoFrameError {
    fn from(err: std::fmt::Error) -> Self {
        GeoFrameError::General(err.to_string())
    }
}
