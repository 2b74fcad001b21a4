//! Read and write geometries as well-known text.

pub use reader::{from_wkt, geometry_from_wkt};
pub use writer::{geometry_to_wkt, write_geometry};

mod reader;
mod writer;
