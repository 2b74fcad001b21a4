//! Contains the nullable geometry array that backs geometry columns.

pub use builder::GeometryBuilder;
pub use geometry::GeometryArray;

mod builder;
mod geometry;
