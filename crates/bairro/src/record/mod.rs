//! Restaurant records and their field types.
//!
//! Records are read from JSON or pipe-delimited files, edited by hand or
//! imported from free text. Loading is deliberately forgiving: a bad field
//! is coerced to its empty value rather than rejecting the record.

mod coerce;
mod restaurant;
mod types;

pub(crate) use coerce::split_list;
pub use restaurant::{name_key, Record};
pub use types::{PriceLevel, RecordSource, TriState};
