use std::io::{Read, Seek};
use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::{Array, RecordBatch};
use arrow_csv::reader::Format;
use arrow_csv::ReaderBuilder;
use arrow_schema::{ArrowError, DataType, Schema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GeoFrameError, Result};
use crate::frame::{Column, GeoDataFrame};
use crate::index::Index;
use crate::io::wkt::from_wkt;

/// Options for the CSV reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvReaderOptions {
    /// The name of the WKT geometry column in the CSV.
    ///
    /// When `None`, a column named `geometry` in any letter case is used.
    pub geometry_column_name: Option<String>,

    /// Whether the first line holds column names.
    pub has_header: bool,

    /// Field delimiter.
    pub delimiter: u8,

    /// The number of rows in each batch.
    pub batch_size: usize,

    /// The number of records used to infer column types. `None` reads the whole input.
    pub max_infer_records: Option<usize>,
}

impl CsvReaderOptions {
    pub fn new(geometry_column_name: Option<String>, batch_size: usize) -> Self {
        Self {
            geometry_column_name,
            batch_size,
            ..Default::default()
        }
    }
}

impl Default for CsvReaderOptions {
    fn default() -> Self {
        Self {
            geometry_column_name: None,
            has_header: true,
            delimiter: b',',
            batch_size: 65_536,
            max_infer_records: Some(1_000),
        }
    }
}

fn find_geometry_column(schema: &Schema, geometry_column_name: Option<&str>) -> Result<usize> {
    match geometry_column_name {
        Some(name) => schema.index_of(name).map_err(|_| {
            ArrowError::CsvError(format!(
                "CSV geometry column specified to have name '{}' but no such column found",
                name
            ))
            .into()
        }),
        None => schema
            .fields()
            .iter()
            .rposition(|field| field.name().to_lowercase() == "geometry")
            .ok_or_else(|| {
                ArrowError::CsvError(
                    "No CSV geometry column name specified and no geometry column found."
                        .to_string(),
                )
                .into()
            }),
    }
}

/// Read a CSV file with a WKT geometry column into a [`GeoDataFrame`].
///
/// Column types are inferred from the data. The geometry column becomes the active geometry
/// and rows get a default `0..len` index. Empty geometry fields are read as nulls.
pub fn read_csv<R: Read + Seek>(mut reader: R, options: &CsvReaderOptions) -> Result<GeoDataFrame> {
    let format = Format::default()
        .with_header(options.has_header)
        .with_delimiter(options.delimiter);
    let (schema, _) = format.infer_schema(&mut reader, options.max_infer_records)?;
    reader.rewind()?;

    let geometry_column_index =
        find_geometry_column(&schema, options.geometry_column_name.as_deref())?;
    let schema = Arc::new(schema);
    let csv_reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .with_batch_size(options.batch_size)
        .build(reader)?;
    let batches = csv_reader.collect::<std::result::Result<Vec<RecordBatch>, ArrowError>>()?;
    let batch = arrow_select::concat::concat_batches(&schema, &batches)?;
    debug!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        batches = batches.len(),
        "read csv"
    );

    let mut columns = Vec::with_capacity(batch.num_columns());
    for (i, (field, array)) in schema.fields().iter().zip(batch.columns()).enumerate() {
        let column = if i == geometry_column_index {
            let geometries = match array.data_type() {
                DataType::Utf8 => from_wkt(array.as_string::<i32>())?,
                DataType::LargeUtf8 => from_wkt(array.as_string::<i64>())?,
                DataType::Null => crate::array::GeometryArray::new_null(array.len()),
                other => {
                    return Err(GeoFrameError::IncorrectType(
                        format!("geometry column must hold WKT text, found {}", other).into(),
                    ))
                }
            };
            Column::Geometry(geometries)
        } else {
            Column::Arrow(array.clone())
        };
        columns.push((field.name().clone(), column));
    }

    let geometry_column = schema.field(geometry_column_index).name().clone();
    GeoDataFrame::try_new(
        Index::range(batch.num_rows()),
        columns,
        Some(geometry_column),
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::csv::{to_csv, CsvWriterOptions};
    use crate::scalar::Value;
    use crate::test::point;
    use std::io::Cursor;

    #[test]
    fn read_written_frame() {
        crate::test::init_tracing();
        let df = point::df();
        let text = to_csv(&df, &CsvWriterOptions::new(true, false)).unwrap();
        let read = read_csv(Cursor::new(text), &CsvReaderOptions::default()).unwrap();
        assert_eq!(read, df);
    }

    #[test]
    fn named_geometry_column_and_nulls() {
        let text = "id;WKT\n1;POINT (1 2)\n2;\n3;LINESTRING (0 0, 1 1)\n";
        let options = CsvReaderOptions {
            geometry_column_name: Some("WKT".to_string()),
            delimiter: b';',
            ..Default::default()
        };
        let read = read_csv(Cursor::new(text), &options).unwrap();
        assert_eq!(read.geometry_column_name(), Some("WKT"));
        assert_eq!(read.loc(1, "WKT").unwrap(), Value::Null);
        assert_eq!(read.loc(2, "id").unwrap(), Value::Int64(3));
        assert!(matches!(
            read.loc(0, "WKT").unwrap(),
            Value::Geometry(geo::Geometry::Point(_))
        ));
    }

    #[test]
    fn empty_column_is_null_everywhere() {
        let text = "geometry,x,y\nPOINT (0 0),,1\nPOINT (1 1),,2\n";
        let read = read_csv(Cursor::new(text), &CsvReaderOptions::default()).unwrap();

        assert_eq!(read.loc(0, "x").unwrap(), Value::Null);
        assert_eq!(read.isna().unwrap().loc(1, "x").unwrap(), Value::Boolean(true));
        assert_eq!(read.count().get("x").unwrap(), Value::Int64(0));
        assert_eq!(read.count().get("y").unwrap(), Value::Int64(2));
        assert!(read.dropna().unwrap().is_empty());
    }

    #[test]
    fn missing_geometry_column() {
        let text = "a,b\n1,2\n";
        let err = read_csv(Cursor::new(text), &CsvReaderOptions::default());
        assert!(matches!(err, Err(GeoFrameError::Arrow(_))));
    }

    #[test]
    fn invalid_wkt() {
        let text = "geometry\nPOINT (1\n";
        let err = read_csv(Cursor::new(text), &CsvReaderOptions::default());
        assert!(matches!(err, Err(GeoFrameError::Wkt(_))));
    }
}
