//! Outcome of merging an import batch.

use serde::{Deserialize, Serialize};

use super::field::MergeField;

/// Why an incoming record changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The record had no usable name.
    MissingName,
    /// The name matched, but every field it carried was already filled in.
    NoNewData,
}

impl IgnoreReason {
    pub fn label(&self) -> &'static str {
        match self {
            IgnoreReason::MissingName => "missing name",
            IgnoreReason::NoNewData => "no new data",
        }
    }
}

/// An existing record that received new field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedRecord {
    pub name: String,
    pub fields: Vec<MergeField>,
}

/// An incoming record that was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoredRecord {
    pub name: String,
    pub reason: IgnoreReason,
}

/// Classification of every incoming record in a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Names of records appended to the dataset.
    pub added: Vec<String>,
    /// Existing records that had blanks filled in.
    pub updated: Vec<UpdatedRecord>,
    /// Incoming records that changed nothing.
    pub ignored: Vec<IgnoredRecord>,
}

impl MergeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the merge changed the dataset.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.ignored.is_empty()
    }

    /// One-line summary, e.g. "2 added, 1 updated, 0 ignored".
    pub fn summary(&self) -> String {
        format!(
            "{} added, {} updated, {} ignored",
            self.added.len(),
            self.updated.len(),
            self.ignored.len()
        )
    }

    /// Record new fields for an existing record, folding repeat hits together.
    pub(crate) fn record_update(&mut self, name: &str, fields: Vec<MergeField>) {
        match self.updated.iter_mut().find(|u| u.name == name) {
            Some(entry) => entry.fields.extend(fields),
            None => self.updated.push(UpdatedRecord {
                name: name.to_string(),
                fields,
            }),
        }
    }

    pub(crate) fn record_ignored(&mut self, name: &str, reason: IgnoreReason) {
        self.ignored.push(IgnoredRecord {
            name: name.to_string(),
            reason,
        });
    }
}
