//! Human-readable rendering of arrays, series and frames.

mod array;
mod scalar;
mod series;
mod table;

pub use series::{DisplayGeoSeries, DisplaySeries};
pub use table::DisplayFrame;

use serde::{Deserialize, Serialize};

/// Options shared by the `Display` implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Longer inputs show their first and last `max_rows / 2` rows around an ellipsis.
    pub max_rows: usize,
}

impl DisplayOptions {
    pub fn new(max_rows: usize) -> Self {
        Self { max_rows }
    }

    /// Row positions to show for `len` rows, with `None` where the ellipsis goes.
    pub(crate) fn visible_rows(&self, len: usize) -> Vec<Option<usize>> {
        let head = (self.max_rows / 2).max(1);
        let tail = (self.max_rows / 2).max(1);
        if len <= self.max_rows || len <= head + tail {
            return (0..len).map(Some).collect();
        }
        (0..head)
            .map(Some)
            .chain(std::iter::once(None))
            .chain((len - tail..len).map(Some))
            .collect()
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::new(60)
    }
}
