use std::io::Write;
use std::sync::Arc;

use arrow_array::{Array, ArrayRef, RecordBatch, StringArray};
use arrow_csv::WriterBuilder;
use arrow_schema::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::algorithm::native::ToWKT;
use crate::error::{GeoFrameError, Result};
use crate::frame::{Column, GeoDataFrame};

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

/// Options for the CSV writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvWriterOptions {
    /// Write a header row of column names.
    pub header: bool,

    /// Write the row labels as the first column.
    pub index: bool,

    /// Field delimiter.
    pub delimiter: u8,

    /// Written after every row, the header included.
    ///
    /// Defaults to the platform line separator.
    pub line_terminator: String,

    /// Written for null cells.
    pub null_value: String,
}

impl CsvWriterOptions {
    pub fn new(header: bool, index: bool) -> Self {
        Self {
            header,
            index,
            ..Default::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_line_terminator(mut self, line_terminator: impl Into<String>) -> Self {
        self.line_terminator = line_terminator.into();
        self
    }

    pub fn with_null_value(mut self, null_value: impl Into<String>) -> Self {
        self.null_value = null_value.into();
        self
    }

    fn builder(&self) -> WriterBuilder {
        WriterBuilder::new()
            .with_delimiter(self.delimiter)
            .with_null(self.null_value.clone())
    }
}

impl Default for CsvWriterOptions {
    fn default() -> Self {
        Self {
            header: true,
            index: true,
            delimiter: b',',
            line_terminator: LINE_SEPARATOR.to_string(),
            null_value: String::new(),
        }
    }
}

/// Lay the frame out as one Arrow batch with geometries rendered as WKT.
fn to_record_batch(frame: &GeoDataFrame, index: bool) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(frame.num_columns() + 1);
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(frame.num_columns() + 1);

    if index {
        let labels: StringArray = frame
            .index()
            .iter()
            .map(|label| Some(label.to_string()))
            .collect();
        fields.push(Field::new(
            frame.index().name().unwrap_or_default(),
            DataType::Utf8,
            false,
        ));
        arrays.push(Arc::new(labels));
    }

    for (name, column) in frame.columns() {
        let array: ArrayRef = match column {
            Column::Geometry(values) => Arc::new(values.to_wkt()),
            Column::Arrow(values) => values.clone(),
        };
        fields.push(Field::new(name.as_str(), array.data_type().clone(), true));
        arrays.push(array);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?)
}

/// Write `batch` with `builder` and replace the trailing newline with `terminator`.
fn write_lines<W: Write>(
    writer: &mut W,
    builder: WriterBuilder,
    batch: &RecordBatch,
    terminator: &str,
) -> Result<()> {
    let mut csv_writer = builder.build(Vec::new());
    csv_writer.write(batch)?;
    let buffer = csv_writer.into_inner();
    let line = buffer.strip_suffix(b"\n").unwrap_or(&buffer);
    writer.write_all(line)?;
    writer.write_all(terminator.as_bytes())?;
    Ok(())
}

/// Write a frame as CSV.
///
/// Geometries are written as WKT, numbers in Arrow's default text form and nulls as
/// [`CsvWriterOptions::null_value`].
pub fn write_csv<W: Write>(
    frame: &GeoDataFrame,
    mut writer: W,
    options: &CsvWriterOptions,
) -> Result<()> {
    debug!(
        rows = frame.len(),
        columns = frame.num_columns(),
        index = options.index,
        "write csv"
    );
    let batch = to_record_batch(frame, options.index)?;

    if options.header {
        let builder = options.builder().with_header(true);
        write_lines(
            &mut writer,
            builder,
            &batch.slice(0, 0),
            &options.line_terminator,
        )?;
    }

    // Rows are written one at a time so a quoted field may still contain a bare newline.
    for row in 0..batch.num_rows() {
        let builder = options.builder().with_header(false);
        write_lines(
            &mut writer,
            builder,
            &batch.slice(row, 1),
            &options.line_terminator,
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Render a frame as a CSV string.
pub fn to_csv(frame: &GeoDataFrame, options: &CsvWriterOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(frame, &mut buffer, options)?;
    String::from_utf8(buffer).map_err(|err| GeoFrameError::General(err.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scalar::Value;
    use crate::test::point::{self, p};

    #[test]
    fn frame_without_index() {
        let df = point::df();
        let exp = "geometry,value1,value2\nPOINT (0 0),0,1\nPOINT (1 1),1,2\nPOINT (2 2),2,1\n"
            .replace('\n', LINE_SEPARATOR);
        let options = CsvWriterOptions::new(true, false);
        assert_eq!(to_csv(&df, &options).unwrap(), exp);
    }

    #[test]
    fn after_assignment() {
        let mut df = point::df();
        df.set_loc(0, "geometry", p(10.).into()).unwrap();
        let options = CsvWriterOptions::new(true, false).with_line_terminator("\n");
        assert_eq!(
            to_csv(&df, &options).unwrap(),
            "geometry,value1,value2\nPOINT (10 10),0,1\nPOINT (1 1),1,2\nPOINT (2 2),2,1\n"
        );
    }

    #[test]
    fn index_and_nulls() {
        let mut df = point::df();
        df.set_iloc(1, 0, Value::Null).unwrap();
        let options = CsvWriterOptions::default()
            .with_line_terminator("\r\n")
            .with_null_value("NA")
            .with_delimiter(b';');
        assert_eq!(
            to_csv(&df, &options).unwrap(),
            ";geometry;value1;value2\r\n0;POINT (0 0);0;1\r\n1;NA;1;2\r\n2;POINT (2 2);2;1\r\n"
        );
    }

    #[test]
    fn without_header() {
        let df = point::df().islice(0..1).unwrap();
        let options = CsvWriterOptions::new(false, false).with_line_terminator("\n");
        assert_eq!(to_csv(&df, &options).unwrap(), "POINT (0 0),0,1\n");
    }

    #[test]
    fn options_from_config() {
        let options: CsvWriterOptions =
            serde_json::from_str(r#"{"index": false, "line_terminator": "\r\n"}"#).unwrap();
        assert!(options.header);
        assert!(!options.index);
        assert_eq!(options.line_terminator, "\r\n");
        assert_eq!(options.delimiter, b',');
    }
}
