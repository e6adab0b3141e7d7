//! Pipe-delimited dataset format.
//!
//! One restaurant per line:
//!
//! ```text
//! name | cuisine;list | price | voucher | diet;list | accessibility | hours | address | description
//! ```
//!
//! Lines starting with `#` are comments. Short lines leave the trailing
//! fields unset; extra columns are ignored.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::warn;

use crate::error::Result;
use crate::record::{split_list, Record, TriState};

/// Column order of the pipe format.
pub const PIPE_COLUMNS: [&str; 9] = [
    "name",
    "cuisine",
    "price",
    "voucher",
    "diet",
    "accessibility",
    "hours",
    "address",
    "description",
];

/// Parse pipe-delimited text into records.
///
/// Lines without a name are skipped with a warning.
pub fn parse_pipe(text: &str) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        if row.iter().all(str::is_empty) {
            continue;
        }

        let record = record_from_row(&row);
        if !record.has_name() {
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            warn!(line, "skipping pipe line without a name");
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

fn record_from_row(row: &StringRecord) -> Record {
    let field = |i: usize| row.get(i).unwrap_or("");
    let text = |i: usize| Some(field(i).to_string()).filter(|s| !s.is_empty());

    let price = match field(2) {
        "" => None,
        raw => match raw.parse() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!(price = raw, name = field(0), "unrecognised price level, leaving it unset");
                None
            }
        },
    };

    Record {
        name: field(0).to_string(),
        cuisine: split_list(field(1)).collect(),
        price_level: price,
        accepts_voucher: TriState::parse_lenient(field(3)),
        diet_options: split_list(field(4)).collect(),
        accessibility: TriState::parse_lenient(field(5)),
        hours: text(6),
        address: text(7),
        description: text(8),
        ..Default::default()
    }
}

/// Render records in the pipe format, with a header comment.
///
/// Neighborhood, highlights and provenance have no column and are dropped.
pub fn to_pipe_string(records: &[Record]) -> String {
    let mut out = format!("# {}\n", PIPE_COLUMNS.join(" | "));
    for record in records {
        let tri = |t: TriState| match t {
            TriState::Yes => "yes",
            TriState::No => "no",
            TriState::Unknown => "",
        };
        let fields = [
            clean(&record.name),
            join_tags(record.cuisine.iter()),
            record.price_level.map(|p| p.symbol().to_string()).unwrap_or_default(),
            tri(record.accepts_voucher).to_string(),
            join_tags(record.diet_options.iter()),
            tri(record.accessibility).to_string(),
            clean(record.hours.as_deref().unwrap_or("")),
            clean(record.address.as_deref().unwrap_or("")),
            clean(record.description.as_deref().unwrap_or("")),
        ];
        out.push_str(fields.join(" | ").trim_end());
        out.push('\n');
    }
    out
}

fn join_tags<'a>(tags: impl Iterator<Item = &'a String>) -> String {
    tags.map(|t| clean(t)).collect::<Vec<_>>().join(";")
}

/// Strip characters that would break the line format.
fn clean(value: &str) -> String {
    value
        .replace(['\n', '\r'], " ")
        .replace('|', "/")
        .trim()
        .to_string()
}
