//! Algorithms implemented on geometry arrays using georust/geo algorithms.

/// Determine whether geometries contain no coordinates.
pub mod is_empty;
pub use is_empty::IsEmpty;

/// Merge a set of geometries into a single geometry.
pub mod unary_union;
pub use unary_union::{unary_union, UnaryUnion};
