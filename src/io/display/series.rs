use std::fmt;

use crate::datatypes::dtype_name;
use crate::index::Index;
use crate::io::display::scalar::format_cell;
use crate::io::display::DisplayOptions;
use crate::scalar::Value;
use crate::series::{GeoSeries, Series};

/// A [`GeoSeries`] rendered with explicit [`DisplayOptions`].
pub struct DisplayGeoSeries<'a> {
    series: &'a GeoSeries,
    options: DisplayOptions,
}

/// A [`Series`] rendered with explicit [`DisplayOptions`].
pub struct DisplaySeries<'a> {
    series: &'a Series,
    options: DisplayOptions,
}

impl GeoSeries {
    pub fn display(&self, options: DisplayOptions) -> DisplayGeoSeries<'_> {
        DisplayGeoSeries {
            series: self,
            options,
        }
    }
}

impl Series {
    pub fn display(&self, options: DisplayOptions) -> DisplaySeries<'_> {
        DisplaySeries {
            series: self,
            options,
        }
    }
}

/// Write `label    value` lines followed by a `Name: ..., dtype: ...` footer.
fn write_labeled<F>(
    f: &mut fmt::Formatter<'_>,
    index: &Index,
    name: Option<&str>,
    dtype: &str,
    options: &DisplayOptions,
    cell: F,
) -> fmt::Result
where
    F: Fn(usize) -> String,
{
    let rows = options.visible_rows(index.len());
    let lines: Vec<(String, String)> = rows
        .iter()
        .map(|row| match row {
            Some(i) => (
                index.get(*i).map(|l| l.to_string()).unwrap_or_default(),
                cell(*i),
            ),
            None => ("...".to_string(), "...".to_string()),
        })
        .collect();

    let label_width = lines.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let value_width = lines.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    for (label, value) in lines.iter() {
        writeln!(
            f,
            "{:<label_width$}    {:>value_width$}",
            label,
            value,
            label_width = label_width,
            value_width = value_width
        )?;
    }

    let truncated = rows.iter().any(|r| r.is_none());
    if let Some(name) = name {
        write!(f, "Name: {}, ", name)?;
    }
    if truncated {
        write!(f, "Length: {}, ", index.len())?;
    }
    write!(f, "dtype: {}", dtype)
}

impl fmt::Display for DisplayGeoSeries<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = self.series.values();
        write_labeled(
            f,
            self.series.index(),
            self.series.name(),
            "geometry",
            &self.options,
            |i| {
                let value = values
                    .get(i)
                    .map_or(Value::Null, |g| Value::Geometry(g.clone()));
                format_cell(&value, true)
            },
        )
    }
}

impl fmt::Display for DisplaySeries<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_labeled(
            f,
            self.series.index(),
            self.series.name(),
            dtype_name(self.series.data_type()),
            &self.options,
            |i| {
                let value = self.series.value(i).unwrap_or(Value::Null);
                format_cell(&value, false)
            },
        )
    }
}

impl fmt::Display for GeoSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(DisplayOptions::default()), f)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(DisplayOptions::default()), f)
    }
}
