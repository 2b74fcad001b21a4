//! Algorithms that are not geometric in nature: selection, comparison, deduplication and text
//! conversion.

mod eq;
mod filter;
mod replace;
mod take;
mod to_wkt;
mod unique;

pub use eq::{eq_arrow, eq_geometry, eq_value};
pub use filter::{filter_arrow, Filter};
pub use replace::replace_arrow_value;
pub use take::{optional_positions_to_indices, positions_to_indices, take_arrow, Take};
pub use to_wkt::ToWKT;
pub use unique::{row_key, KeyPart, Unique};
