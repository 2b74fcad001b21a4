use std::fmt;

use crate::frame::GeoDataFrame;
use crate::io::display::scalar::format_cell;
use crate::io::display::DisplayOptions;
use crate::scalar::Value;

/// A [`GeoDataFrame`] rendered with explicit [`DisplayOptions`].
pub struct DisplayFrame<'a> {
    frame: &'a GeoDataFrame,
    options: DisplayOptions,
}

impl GeoDataFrame {
    pub fn display(&self, options: DisplayOptions) -> DisplayFrame<'_> {
        DisplayFrame {
            frame: self,
            options,
        }
    }
}

impl fmt::Display for DisplayFrame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame;
        if frame.num_columns() == 0 || frame.is_empty() {
            writeln!(f, "Empty GeoDataFrame")?;
            writeln!(f, "Columns: [{}]", frame.column_names().join(", "))?;
            return write!(f, "Index: []");
        }

        let rows = self.options.visible_rows(frame.len());
        let labels: Vec<String> = rows
            .iter()
            .map(|row| match row {
                Some(i) => frame
                    .index()
                    .get(*i)
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                None => "...".to_string(),
            })
            .collect();
        let index_name = frame.index().name().unwrap_or_default();

        // one Vec of cell text per column, header first
        let columns: Vec<Vec<String>> = frame
            .columns()
            .iter()
            .map(|(name, column)| {
                std::iter::once(name.clone())
                    .chain(rows.iter().map(|row| match row {
                        Some(i) => {
                            let value = column.value(*i).unwrap_or(Value::Null);
                            format_cell(&value, column.is_geometry())
                        }
                        None => "...".to_string(),
                    }))
                    .collect()
            })
            .collect();

        let label_width = labels
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(index_name.chars().count()))
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = columns
            .iter()
            .map(|cells| cells.iter().map(|c| c.chars().count()).max().unwrap_or(0))
            .collect();

        write!(f, "{:label_width$}", "", label_width = label_width)?;
        for (cells, width) in columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", cells[0], width = *width)?;
        }
        if !index_name.is_empty() {
            write!(f, "\n{}", index_name)?;
        }

        for (row, label) in labels.iter().enumerate() {
            write!(f, "\n{:<label_width$}", label, label_width = label_width)?;
            for (cells, width) in columns.iter().zip(&widths) {
                write!(f, "  {:>width$}", cells[row + 1], width = *width)?;
            }
        }

        if rows.iter().any(|r| r.is_none()) {
            write!(
                f,
                "\n\n[{} rows x {} columns]",
                frame.len(),
                frame.num_columns()
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for GeoDataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(DisplayOptions::default()), f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::point;

    #[test]
    fn frame() {
        let df = point::df();
        let expected = "      geometry  value1  value2
0  POINT (0 0)       0       1
1  POINT (1 1)       1       2
2  POINT (2 2)       2       1";
        assert_eq!(df.to_string(), expected);
        assert!(df.to_string().contains("POINT"));
    }

    #[test]
    fn grouped_frame_shows_index_name() {
        let res = point::df().groupby("value2").unwrap().count().unwrap();
        let expected = "        geometry  value1
value2
1              2       2
2              1       1";
        assert_eq!(res.to_string(), expected);
    }

    #[test]
    fn truncated_frame() {
        let df = point::df();
        let expected = "        geometry  value1  value2
0    POINT (0 0)       0       1
...          ...     ...     ...
2    POINT (2 2)       2       1

[3 rows x 3 columns]";
        assert_eq!(df.display(DisplayOptions::new(2)).to_string(), expected);
    }

    #[test]
    fn empty_frame() {
        let df = point::df().filter(&[false, false, false]).unwrap();
        assert_eq!(
            df.to_string(),
            "Empty GeoDataFrame\nColumns: [geometry, value1, value2]\nIndex: []"
        );
    }
}
