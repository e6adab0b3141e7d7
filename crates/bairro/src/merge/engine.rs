//! Fill-only-blanks merge of imported records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::record::Record;

use super::field::MergeField;
use super::report::{IgnoreReason, MergeReport};

/// Merge a batch of incoming records into an existing record list.
///
/// Records are matched by case-folded name. A new name is appended; a known
/// name only fills fields that are blank on the existing record, so curated
/// values are never overwritten. Nameless records and matches that bring no
/// new values are reported as ignored.
///
/// Records already in `existing` that share a case-folded name are folded
/// into the first of them before the batch is applied.
///
/// Merging the same batch twice leaves the second pass fully ignored.
///
/// # Example
///
/// ```
/// use bairro::{merge_records, Record};
///
/// let mut data = vec![Record::new("Gael Cozinha Mestiça").with_hours("12h-15h")];
/// let batch = vec![
///     Record::new("gael cozinha mestiça").with_hours("0h-24h").with_address("Rua X, 1"),
///     Record::new("Momokuri"),
/// ];
///
/// let report = merge_records(&mut data, batch);
/// assert_eq!(report.added, vec!["Momokuri"]);
/// assert_eq!(report.updated.len(), 1);
/// assert_eq!(data[0].hours.as_deref(), Some("12h-15h"));
/// assert_eq!(data[0].address.as_deref(), Some("Rua X, 1"));
/// ```
pub fn merge_records<I>(existing: &mut Vec<Record>, incoming: I) -> MergeReport
where
    I: IntoIterator<Item = Record>,
{
    let now = Utc::now();
    let mut report = MergeReport::new();
    let mut index = fold_existing_duplicates(existing, &mut report, now);

    for mut record in incoming {
        if !record.has_name() {
            debug!("ignoring incoming record without a name");
            report.record_ignored(&record.name, IgnoreReason::MissingName);
            continue;
        }

        let key = record.name_key();
        match index.get(&key) {
            None => {
                if record.updated_at.is_none() {
                    record.updated_at = Some(now);
                }
                debug!(name = %record.name, "adding new record");
                index.insert(key, existing.len());
                report.added.push(record.name.clone());
                existing.push(record);
            }
            Some(&position) => {
                let target = &mut existing[position];
                let filled = fill_blanks(target, &record);
                if filled.is_empty() {
                    debug!(name = %record.name, "incoming record brings no new data");
                    report.record_ignored(&record.name, IgnoreReason::NoNewData);
                } else {
                    debug!(name = %target.name, fields = ?filled, "filled blank fields");
                    target.updated_at = Some(now);
                    report.record_update(&target.name, filled);
                }
            }
        }
    }

    info!(
        added = report.added.len(),
        updated = report.updated.len(),
        ignored = report.ignored.len(),
        "merge complete"
    );

    report
}

/// Collapse records in `existing` that share a case-folded name.
///
/// Later duplicates fill blanks on the first occurrence and are removed, so
/// a hand-edited file with repeated names comes out of any merge with one
/// record per name. Returns the name index of the surviving records.
fn fold_existing_duplicates(
    existing: &mut Vec<Record>,
    report: &mut MergeReport,
    now: DateTime<Utc>,
) -> HashMap<String, usize> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let records = std::mem::take(existing);
    existing.reserve(records.len());

    for record in records {
        if !record.has_name() {
            existing.push(record);
            continue;
        }

        let key = record.name_key();
        match index.get(&key) {
            None => {
                index.insert(key, existing.len());
                existing.push(record);
            }
            Some(&position) => {
                let target = &mut existing[position];
                warn!(name = %record.name, kept = %target.name, "dataset holds a duplicate name, folding it");
                let filled = fill_blanks(target, &record);
                if filled.is_empty() {
                    report.record_ignored(&record.name, IgnoreReason::NoNewData);
                } else {
                    target.updated_at = Some(now);
                    report.record_update(&target.name, filled);
                }
            }
        }
    }

    index
}

/// Copy every field that is blank on `target` and set on `incoming`.
///
/// Returns the fields that changed, in [`MergeField::ALL`] order.
pub fn fill_blanks(target: &mut Record, incoming: &Record) -> Vec<MergeField> {
    let mut filled = Vec::new();
    for field in MergeField::ALL {
        if field.is_blank(target) && !field.is_blank(incoming) {
            field.copy(incoming, target);
            filled.push(field);
        }
    }
    filled
}
