//! Geometry-aware labeled series and data frames built on [Apache Arrow](https://arrow.apache.org)
//! arrays and [`geo`] geometries.
//!
//! A [`GeoSeries`] is a labeled column of nullable geometries. A [`GeoDataFrame`] is a table of
//! such columns alongside ordinary Arrow columns, with one active geometry column. Operations
//! that make no sense on geometries (arithmetic, ordering, numeric casts) fail with
//! [`GeoFrameError::IncorrectType`]; comparisons and null handling never do.
//!
//! ```
//! use geo::point;
//! use geoframe::{Column, GeoDataFrame, GeometryArray};
//! use geoframe::io::csv::CsvWriterOptions;
//!
//! let geometry: GeometryArray = vec![point!(x: 0., y: 0.), point!(x: 1., y: 1.)].into();
//! let df = GeoDataFrame::from_columns(vec![("geometry".to_string(), Column::Geometry(geometry))])
//!     .unwrap();
//! let options = CsvWriterOptions::new(true, false).with_line_terminator("\n");
//! assert_eq!(df.to_csv(&options).unwrap(), "geometry\nPOINT (0 0)\nPOINT (1 1)\n");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use array::GeometryArray;
pub use error::{GeoFrameError, Result};
pub use frame::{Column, GeoDataFrame};
pub use groupby::GroupBy;
pub use index::Index;
pub use scalar::{Label, Value};
pub use series::{GeoSeries, Series};

pub mod algorithm;
pub mod array;
pub mod datatypes;
pub mod error;
pub mod frame;
pub mod groupby;
pub mod index;
pub mod io;
pub mod ops;
pub mod scalar;
pub mod series;
#[cfg(test)]
pub(crate) mod test;
