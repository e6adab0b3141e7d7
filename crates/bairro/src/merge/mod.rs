//! Merge engine for imported records.
//!
//! Imports come from a deterministic text parser or from a language model.
//! Both produce plain [`Record`](crate::Record) values, which are merged
//! into the dataset by case-folded name with fill-only-blanks semantics.

mod engine;
mod field;
mod report;

pub use engine::{fill_blanks, merge_records};
pub use field::MergeField;
pub use report::{IgnoreReason, IgnoredRecord, MergeReport, UpdatedRecord};
