//! Vectorized algorithms implemented on and returning geometry and Arrow arrays.

pub mod geo;
pub mod native;
