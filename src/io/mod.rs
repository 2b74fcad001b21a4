//! Text formats: WKT for single geometries, CSV for whole frames, and human-readable display.

pub mod csv;
pub mod display;
pub mod wkt;
