//! A labeled table whose columns may hold geometries.

mod column;

pub use column::Column;

use std::collections::HashSet;
use std::io::Write;
use std::ops::Range;
use std::sync::Arc;

use arrow_array::{ArrayRef, BooleanArray, Float64Array, Int64Array, UInt64Array};
use geo::Geometry;
use tracing::{debug, trace};

use crate::algorithm::native::{
    eq_arrow, eq_value, optional_positions_to_indices, positions_to_indices, row_key, KeyPart,
};
use crate::datatypes::DTypeKind;
use crate::error::{GeoFrameError, Result};
use crate::groupby::GroupBy;
use crate::index::Index;
use crate::io::csv::CsvWriterOptions;
use crate::ops::{arith_arrow, sum_arrow, ArithmeticOp};
use crate::scalar::{Label, Value};
use crate::series::{GeoSeries, Series};

/// A table of equally long named columns sharing one row [`Index`].
///
/// At most one geometry column is *active*; it is what [`GeoDataFrame::geometry`] returns.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDataFrame {
    index: Index,
    columns: Vec<(String, Column)>,
    geometry_column: Option<String>,
}

impl GeoDataFrame {
    /// Create a frame, checking that every column matches the index length and that the
    /// active geometry column exists and holds geometries.
    pub fn try_new(
        index: Index,
        columns: Vec<(String, Column)>,
        geometry_column: Option<String>,
    ) -> Result<Self> {
        let mut names = HashSet::with_capacity(columns.len());
        for (name, column) in columns.iter() {
            if column.len() != index.len() {
                return Err(GeoFrameError::LengthMismatch {
                    expected: index.len(),
                    actual: column.len(),
                });
            }
            if !names.insert(name.as_str()) {
                return Err(GeoFrameError::General(format!(
                    "duplicate column name: {}",
                    name
                )));
            }
        }

        if let Some(name) = &geometry_column {
            let (_, column) = columns
                .iter()
                .find(|(n, _)| n == name)
                .ok_or_else(|| GeoFrameError::ColumnNotFound(name.clone()))?;
            if !column.is_geometry() {
                return Err(GeoFrameError::IncorrectType(
                    format!("active geometry column {} does not hold geometries", name).into(),
                ));
            }
        }

        Ok(Self {
            index,
            columns,
            geometry_column,
        })
    }

    /// Create a frame with a default index. A geometry column named `"geometry"` becomes the
    /// active geometry.
    pub fn from_columns(columns: Vec<(String, Column)>) -> Result<Self> {
        let len = columns.first().map_or(0, |(_, c)| c.len());
        let geometry_column = columns
            .iter()
            .find(|(name, column)| name == "geometry" && column.is_geometry())
            .map(|(name, _)| name.clone());
        Self::try_new(Index::range(len), columns, geometry_column)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn columns(&self) -> &[(String, Column)] {
        &self.columns
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn set_index(&mut self, index: Index) -> Result<()> {
        if index.len() != self.len() {
            return Err(GeoFrameError::LengthMismatch {
                expected: self.len(),
                actual: index.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Name of the active geometry column.
    pub fn geometry_column_name(&self) -> Option<&str> {
        self.geometry_column.as_deref()
    }

    /// Make another geometry column the active one.
    pub fn set_geometry(&mut self, name: &str) -> Result<()> {
        if !self.column(name)?.is_geometry() {
            return Err(GeoFrameError::IncorrectType(
                format!("column {} does not hold geometries", name).into(),
            ));
        }
        self.geometry_column = Some(name.to_string());
        Ok(())
    }

    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| GeoFrameError::ColumnNotFound(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        Ok(&self.columns[self.column_position(name)?].1)
    }

    fn column_at(&self, pos: usize) -> Result<&(String, Column)> {
        self.columns
            .get(pos)
            .ok_or(GeoFrameError::IndexOutOfBounds {
                index: pos,
                len: self.columns.len(),
            })
    }

    /// A non-geometry column as a [`Series`] sharing this frame's index.
    pub fn series(&self, name: &str) -> Result<Series> {
        match self.column(name)? {
            Column::Arrow(values) => Series::try_new(
                self.index.clone(),
                values.clone(),
                Some(name.to_string()),
            ),
            Column::Geometry(_) => Err(GeoFrameError::IncorrectType(
                format!("column {} holds geometries, use geo_series", name).into(),
            )),
        }
    }

    /// A geometry column as a [`GeoSeries`] sharing this frame's index.
    pub fn geo_series(&self, name: &str) -> Result<GeoSeries> {
        match self.column(name)? {
            Column::Geometry(values) => GeoSeries::try_new(
                self.index.clone(),
                values.clone(),
                Some(name.to_string()),
            ),
            Column::Arrow(_) => Err(GeoFrameError::IncorrectType(
                format!("column {} does not hold geometries", name).into(),
            )),
        }
    }

    /// The active geometry column.
    pub fn geometry(&self) -> Result<GeoSeries> {
        let name = self
            .geometry_column
            .as_deref()
            .ok_or(GeoFrameError::NoActiveGeometry)?;
        self.geo_series(name)
    }

    /// The cell at the first row labeled `label` in column `col`.
    pub fn loc(&self, label: impl Into<Label>, col: &str) -> Result<Value> {
        let pos = self.index.try_get_loc(&label.into())?;
        self.column(col)?.value(pos)
    }

    /// The cell at row `pos` of the column at position `col_pos`.
    pub fn iloc(&self, pos: usize, col_pos: usize) -> Result<Value> {
        self.column_at(col_pos)?.1.value(pos)
    }

    fn with_rows(&self, index: Index, columns: Vec<(String, Column)>) -> Self {
        Self {
            index,
            columns,
            geometry_column: self.geometry_column.clone(),
        }
    }

    fn take_rows(&self, index: Index, indices: &UInt64Array) -> Result<Self> {
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| Ok((name.clone(), column.take(indices)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_rows(index, columns))
    }

    /// Rows with the given labels, in the given order.
    pub fn loc_rows(&self, labels: &[Label]) -> Result<Self> {
        let positions = self.index.get_locs(labels)?;
        self.iloc_rows(&positions)
    }

    /// Rows at the given positions, in the given order.
    pub fn iloc_rows(&self, positions: &[usize]) -> Result<Self> {
        if let Some(&bad) = positions.iter().find(|&&p| p >= self.len()) {
            return Err(GeoFrameError::IndexOutOfBounds {
                index: bad,
                len: self.len(),
            });
        }
        self.take_rows(self.index.take(positions), &positions_to_indices(positions))
    }

    /// Rows where `mask` is true.
    pub fn filter(&self, mask: &[bool]) -> Result<Self> {
        if mask.len() != self.len() {
            return Err(GeoFrameError::LengthMismatch {
                expected: self.len(),
                actual: mask.len(),
            });
        }
        let predicate = BooleanArray::from(mask.to_vec());
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| Ok((name.clone(), column.filter(&predicate)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_rows(self.index.filter(mask), columns))
    }

    /// Rows where a boolean series is true. Null entries drop the row.
    pub fn filter_series(&self, mask: &Series) -> Result<Self> {
        let values = mask.as_boolean().ok_or_else(|| {
            GeoFrameError::IncorrectType("row mask must be a boolean series".into())
        })?;
        let mask: Vec<bool> = values.iter().map(|v| v == Some(true)).collect();
        self.filter(&mask)
    }

    /// Positional row slice.
    pub fn islice(&self, range: Range<usize>) -> Result<Self> {
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| Ok((name.clone(), column.slice(range.clone())?)))
            .collect::<Result<Vec<_>>>()?;
        let index = self.index.slice(range)?;
        Ok(self.with_rows(index, columns))
    }

    /// Rows between two labels, both inclusive.
    pub fn loc_slice(&self, start: Option<&Label>, end: Option<&Label>) -> Result<Self> {
        let range = self.index.slice_locs(start, end)?;
        self.islice(range)
    }

    /// The named columns, in the given order.
    ///
    /// The active geometry stays active only if it is among them.
    pub fn select(&self, names: &[&str]) -> Result<Self> {
        let columns = names
            .iter()
            .map(|name| Ok((name.to_string(), self.column(name)?.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.with_columns(columns))
    }

    fn with_columns(&self, columns: Vec<(String, Column)>) -> Self {
        let geometry_column = self
            .geometry_column
            .as_ref()
            .filter(|g| columns.iter().any(|(n, _)| n == *g))
            .cloned();
        Self {
            index: self.index.clone(),
            columns,
            geometry_column,
        }
    }

    /// Conform the rows to `labels`. Labels absent from the index produce a null in every
    /// column; present labels keep their values. Column types are preserved.
    pub fn reindex(&self, labels: &[Label]) -> Result<Self> {
        let indexer = self.index.get_indexer(labels);
        debug!(
            len = labels.len(),
            missing = indexer.iter().filter(|p| p.is_none()).count(),
            "reindex frame rows"
        );
        let mut index = Index::new(labels.to_vec());
        index.set_name(self.index.name().map(String::from));
        self.take_rows(index, &optional_positions_to_indices(&indexer))
    }

    /// Conform the columns to `names`. Absent columns become all-null `Float64` columns.
    pub fn reindex_columns(&self, names: &[&str]) -> Self {
        debug!(columns = ?names, "reindex frame columns");
        let columns = names
            .iter()
            .map(|name| {
                let column = match self.column(name) {
                    Ok(column) => column.clone(),
                    Err(_) => Column::missing(self.len()),
                };
                (name.to_string(), column)
            })
            .collect();
        self.with_columns(columns)
    }

    /// Write one cell addressed by row label and column name.
    pub fn set_loc(&mut self, label: impl Into<Label>, col: &str, value: Value) -> Result<()> {
        let label = label.into();
        let pos = self.index.try_get_loc(&label)?;
        let col_pos = self.column_position(col)?;
        trace!(%label, col, "set cell");
        self.columns[col_pos].1.set(pos, value)
    }

    /// Write one cell addressed by row and column position.
    pub fn set_iloc(&mut self, pos: usize, col_pos: usize, value: Value) -> Result<()> {
        let len = self.columns.len();
        let (name, column) = self
            .columns
            .get_mut(col_pos)
            .ok_or(GeoFrameError::IndexOutOfBounds { index: col_pos, len })?;
        trace!(pos, col = name.as_str(), "set cell");
        column.set(pos, value)
    }

    /// A copy with `value` broadcast into column `name`, added at the end or replacing an
    /// existing column of that name.
    pub fn assign(&self, name: &str, value: Value) -> Result<Self> {
        let mut out = self.clone();
        out.insert_column(name, Column::broadcast(&value, self.len())?)?;
        Ok(out)
    }

    /// Add a column at the end, or replace the column of the same name in place.
    pub fn insert_column(&mut self, name: &str, column: Column) -> Result<()> {
        if column.len() != self.len() {
            return Err(GeoFrameError::LengthMismatch {
                expected: self.len(),
                actual: column.len(),
            });
        }
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                if self.geometry_column.as_deref() == Some(name) && !column.is_geometry() {
                    self.geometry_column = None;
                }
                *existing = column;
            }
            None => self.columns.push((name.to_string(), column)),
        }
        Ok(())
    }

    /// Remove a column and return it.
    pub fn remove_column(&mut self, name: &str) -> Result<Column> {
        let pos = self.column_position(name)?;
        if self.geometry_column.as_deref() == Some(name) {
            self.geometry_column = None;
        }
        Ok(self.columns.remove(pos).1)
    }

    /// Columns whose kind is one of `include`, in their original order.
    pub fn select_dtypes(&self, include: &[DTypeKind]) -> Self {
        let columns = self
            .columns
            .iter()
            .filter(|(_, column)| include.contains(&column.kind()))
            .cloned()
            .collect();
        self.with_columns(columns)
    }

    /// Column sums over the numeric and boolean columns. Other columns are skipped.
    ///
    /// The result is `Int64` when every summed column is integer or boolean, `Float64`
    /// otherwise. It is indexed by column name.
    pub fn sum(&self) -> Result<Series> {
        let mut labels = Vec::new();
        let mut sums = Vec::new();
        for (name, column) in self.columns.iter() {
            if let Column::Arrow(values) = column {
                if column.kind().is_summable() {
                    labels.push(Label::from(name.as_str()));
                    sums.push(sum_arrow(values.as_ref())?);
                }
            }
        }
        Series::try_new(Index::new(labels), values_to_number_array(&sums), None)
    }

    /// Non-null counts for every column, indexed by column name.
    pub fn count(&self) -> Series {
        let labels = self
            .columns
            .iter()
            .map(|(name, _)| Label::from(name.as_str()))
            .collect::<Vec<_>>();
        let counts: Int64Array = self
            .columns
            .iter()
            .map(|(_, column)| Some((column.len() - column.null_count()) as i64))
            .collect();
        Series {
            name: None,
            index: Index::new(labels),
            values: Arc::new(counts),
        }
    }

    /// Element-wise arithmetic with a scalar.
    ///
    /// Fails with [`GeoFrameError::IncorrectType`] when any column holds geometries or text.
    pub fn binary_op(&self, op: ArithmeticOp, rhs: &Value) -> Result<Self> {
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| match column {
                Column::Arrow(values) => {
                    Ok((name.clone(), Column::Arrow(arith_arrow(values, op, rhs)?)))
                }
                Column::Geometry(_) => Err(GeoFrameError::IncorrectType(
                    format!(
                        "unsupported operand types for {}: geometry and {}",
                        op.symbol(),
                        rhs.type_name()
                    )
                    .into(),
                )),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            index: self.index.clone(),
            columns,
            geometry_column: None,
        })
    }

    fn map_to_boolean<F>(&self, f: F) -> Result<Self>
    where
        F: Fn(&Column) -> Result<BooleanArray>,
    {
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| {
                let values: ArrayRef = Arc::new(f(column)?);
                Ok((name.clone(), Column::Arrow(values)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            index: self.index.clone(),
            columns,
            geometry_column: None,
        })
    }

    /// Element-wise equality with a scalar. Never fails on mismatched types; such cells are
    /// `false`.
    pub fn eq_value(&self, rhs: &Value) -> Result<Self> {
        self.map_to_boolean(|column| match column {
            Column::Geometry(values) => Ok(eq_value(values, rhs)),
            Column::Arrow(values) => eq_arrow(values, rhs),
        })
    }

    /// `true` wherever a cell is null.
    pub fn isna(&self) -> Result<Self> {
        self.map_to_boolean(Column::is_na)
    }

    /// Drop every row holding a null in any column.
    pub fn dropna(&self) -> Result<Self> {
        let keep: Vec<bool> = (0..self.len())
            .map(|i| self.columns.iter().all(|(_, column)| !column.is_null(i)))
            .collect();
        self.filter(&keep)
    }

    /// Replace nulls in every geometry column with `value`.
    pub fn fillna_geometry(&self, value: &Geometry) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(name, column)| match column {
                Column::Geometry(values) => {
                    (name.clone(), Column::Geometry(values.fill_null(value)))
                }
                other => (name.clone(), other.clone()),
            })
            .collect();
        self.with_rows(self.index.clone(), columns)
    }

    /// The cells of one row, restricted to the given column positions.
    fn row_values(&self, row: usize, col_positions: &[usize]) -> Result<Vec<Value>> {
        col_positions
            .iter()
            .map(|&c| self.columns[c].1.value(row))
            .collect()
    }

    /// Drop rows that repeat an earlier row, comparing only the `subset` columns (all columns
    /// when `None`). The first occurrence is kept.
    pub fn drop_duplicates(&self, subset: Option<&[&str]>) -> Result<Self> {
        let col_positions = match subset {
            Some(names) => names
                .iter()
                .map(|name| self.column_position(name))
                .collect::<Result<Vec<_>>>()?,
            None => (0..self.columns.len()).collect(),
        };

        let mut seen: HashSet<Vec<KeyPart>> = HashSet::with_capacity(self.len());
        let mut keep = Vec::with_capacity(self.len());
        for row in 0..self.len() {
            let key = row_key(&self.row_values(row, &col_positions)?);
            keep.push(seen.insert(key));
        }
        self.filter(&keep)
    }

    /// Group rows by the values of column `key`.
    pub fn groupby(&self, key: &str) -> Result<GroupBy<'_>> {
        GroupBy::try_new(self, key)
    }

    /// Render as CSV text. See [`crate::io::csv::write_csv`].
    pub fn to_csv(&self, options: &CsvWriterOptions) -> Result<String> {
        crate::io::csv::to_csv(self, options)
    }

    /// Write as CSV. See [`crate::io::csv::write_csv`].
    pub fn write_csv<W: Write>(&self, writer: W, options: &CsvWriterOptions) -> Result<()> {
        crate::io::csv::write_csv(self, writer, options)
    }
}

/// Pack sums into one array: `Int64` when all are integers, `Float64` otherwise.
pub(crate) fn values_to_number_array(values: &[Value]) -> ArrayRef {
    if values.iter().all(|v| matches!(v, Value::Int64(_))) {
        let ints: Int64Array = values
            .iter()
            .map(|v| match v {
                Value::Int64(i) => Some(*i),
                _ => None,
            })
            .collect();
        Arc::new(ints)
    } else {
        let floats: Float64Array = values
            .iter()
            .map(|v| match v {
                Value::Int64(i) => Some(*i as f64),
                Value::Float64(f) => Some(*f),
                _ => None,
            })
            .collect();
        Arc::new(floats)
    }
}
