//! Ranked results shared by structured and lexical retrieval.

use serde::Serialize;

use crate::record::Record;

/// A copy of a dataset record annotated with a transient ranking score.
///
/// The score is never written back into the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: Record,
    pub score: u32,
}

impl ScoredRecord {
    pub fn new(record: Record, score: u32) -> Self {
        Self { record, score }
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }
}

/// Stable sort by descending score; equal scores keep dataset order.
pub fn sort_by_score(results: &mut [ScoredRecord]) {
    results.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Keep only the first `k` results.
pub fn top_k(mut results: Vec<ScoredRecord>, k: usize) -> Vec<ScoredRecord> {
    results.truncate(k);
    results
}
