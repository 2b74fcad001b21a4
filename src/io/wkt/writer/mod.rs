pub use scalar::{geometry_to_wkt, write_geometry};

mod scalar;
