//! Dataset store: loading and saving restaurant records.
//!
//! The engines never touch files. A [`Dataset`] is loaded once, handed to
//! filter/search/merge calls, and saved back as a whole-file rewrite.
//!
//! Two encodings are supported and produce identical [`Record`](crate::Record)
//! values:
//!
//! - JSON: an array of objects mirroring the record shape
//! - Pipe: `name | cuisine;list | price | voucher | diet;list | accessibility | hours | address | description`

mod dataset;
mod persistence;
mod pipe;

pub use dataset::{Dataset, DatasetFormat, DatasetMetadata};
pub(crate) use dataset::parse_json_records;
pub use pipe::{parse_pipe, to_pipe_string, PIPE_COLUMNS};
