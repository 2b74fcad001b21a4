//! Labeled one-dimensional containers.

mod arrow_series;
mod geo_series;

pub use arrow_series::Series;
pub use geo_series::GeoSeries;
