//! Split a frame into groups of rows sharing a key and reduce each group.

use std::sync::Arc;

use arrow_array::Int64Array;
use geo::Geometry;
use indexmap::IndexMap;
use tracing::debug;

use crate::algorithm::geo::UnaryUnion;
use crate::algorithm::native::positions_to_indices;
use crate::error::{GeoFrameError, Result};
use crate::frame::{values_to_number_array, Column, GeoDataFrame};
use crate::index::Index;
use crate::ops::sum_arrow;
use crate::scalar::{Label, Value};
use crate::series::GeoSeries;

/// Rows of a [`GeoDataFrame`] grouped by the values of one key column.
///
/// Groups are ordered by ascending key. Rows whose key is null belong to no group.
#[derive(Debug)]
pub struct GroupBy<'a> {
    frame: &'a GeoDataFrame,
    key: String,
    groups: IndexMap<Label, Vec<usize>>,
}

fn key_label(value: Value) -> Result<Option<Label>> {
    match value {
        Value::Null => Ok(None),
        Value::Int64(v) => Ok(Some(Label::Int(v))),
        Value::Boolean(v) => Ok(Some(Label::Int(v as i64))),
        Value::Utf8(v) => Ok(Some(Label::Str(v))),
        other => Err(GeoFrameError::IncorrectType(
            format!("cannot group by values of type {}", other.type_name()).into(),
        )),
    }
}

impl<'a> GroupBy<'a> {
    pub(crate) fn try_new(frame: &'a GeoDataFrame, key: &str) -> Result<Self> {
        let column = frame.column(key)?;
        let mut groups: IndexMap<Label, Vec<usize>> = IndexMap::new();
        for row in 0..frame.len() {
            if let Some(label) = key_label(column.value(row)?)? {
                groups.entry(label).or_default().push(row);
            }
        }
        groups.sort_keys();
        debug!(key, ngroups = groups.len(), "grouped frame");

        Ok(Self {
            frame,
            key: key.to_string(),
            groups,
        })
    }

    /// Name of the key column.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ngroups(&self) -> usize {
        self.groups.len()
    }

    /// Group keys in ascending order.
    pub fn keys(&self) -> Vec<Label> {
        self.groups.keys().cloned().collect()
    }

    /// Row positions of every group.
    pub fn groups(&self) -> &IndexMap<Label, Vec<usize>> {
        &self.groups
    }

    fn result_index(&self) -> Index {
        Index::new(self.keys()).with_name(self.key.as_str())
    }

    fn value_columns(&self) -> impl Iterator<Item = &(String, Column)> + '_ {
        self.frame
            .columns()
            .iter()
            .filter(move |(name, _)| name != &self.key)
    }

    /// Non-null counts per group for every column except the key.
    pub fn count(&self) -> Result<GeoDataFrame> {
        let columns = self
            .value_columns()
            .map(|(name, column)| {
                let counts: Int64Array = self
                    .groups
                    .values()
                    .map(|rows| {
                        Some(rows.iter().filter(|&&r| !column.is_null(r)).count() as i64)
                    })
                    .collect();
                (name.clone(), Column::Arrow(Arc::new(counts)))
            })
            .collect();
        GeoDataFrame::try_new(self.result_index(), columns, None)
    }

    /// Per-group sums of the numeric and boolean columns. Geometry and text columns are
    /// skipped.
    pub fn sum(&self) -> Result<GeoDataFrame> {
        let mut columns = Vec::new();
        for (name, column) in self.value_columns() {
            let values = match column {
                Column::Arrow(values) if column.kind().is_summable() => values,
                _ => continue,
            };
            let sums = self
                .groups
                .values()
                .map(|rows| {
                    let taken = arrow_select::take::take(
                        values.as_ref(),
                        &positions_to_indices(rows),
                        None,
                    )?;
                    sum_arrow(taken.as_ref())
                })
                .collect::<Result<Vec<_>>>()?;
            columns.push((name.clone(), Column::Arrow(values_to_number_array(&sums))));
        }
        GeoDataFrame::try_new(self.result_index(), columns, None)
    }

    /// The rows of one group with their original labels.
    pub fn get_group(&self, key: impl Into<Label>) -> Result<GeoDataFrame> {
        let key = key.into();
        let rows = self
            .groups
            .get(&key)
            .ok_or_else(|| GeoFrameError::KeyError(key.to_string()))?;
        self.frame.iloc_rows(rows)
    }

    /// Reduce the geometries of `column` in every group with `f`.
    ///
    /// The result is named after the column and indexed by the group keys.
    pub fn apply_geometry<F>(&self, column: &str, f: F) -> Result<GeoSeries>
    where
        F: Fn(&GeoSeries) -> Option<Geometry>,
    {
        let series = self.frame.geo_series(column)?;
        let values = self
            .groups
            .values()
            .map(|rows| Ok(f(&series.iloc(rows)?)))
            .collect::<Result<Vec<_>>>()?;
        GeoSeries::try_new(
            self.result_index(),
            values.into(),
            Some(column.to_string()),
        )
    }

    /// Union of the geometries of `column` in every group.
    pub fn unary_union(&self, column: &str) -> Result<GeoSeries> {
        self.apply_geometry(column, |s| Some(s.values().unary_union()))
    }
}
