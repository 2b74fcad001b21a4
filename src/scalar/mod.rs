//! Single values: row labels and table cells.

pub use label::Label;
pub use value::Value;

mod label;
mod value;
