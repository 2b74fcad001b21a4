//! Read from and write to CSV files.

pub use reader::{read_csv, CsvReaderOptions};
pub use writer::{to_csv, write_csv, CsvWriterOptions};

mod reader;
mod writer;
