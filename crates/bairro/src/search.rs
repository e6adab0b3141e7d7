//! Free-text lexical search over a small record set.
//!
//! Scoring is plain term overlap against each record's searchable text:
//!
//! - +1 when a query token occurs anywhere in the record
//! - +2 more when it occurs in the name
//! - +1 more when it occurs in any highlight
//!
//! When nothing matches, the first `k` records are returned unranked so the
//! caller always has something to show.

use tracing::debug;

use crate::filter::{sort_by_score, ScoredRecord};
use crate::record::Record;

/// Default number of results returned by lexical search.
pub const DEFAULT_TOP_K: usize = 5;

const BLOB_WEIGHT: u32 = 1;
const NAME_BONUS: u32 = 2;
const HIGHLIGHT_BONUS: u32 = 1;

/// Split a query into lowercase alphanumeric tokens.
///
/// Any non-alphanumeric character separates tokens; accented letters are
/// alphanumeric. Repeated tokens are kept once, in first-seen order.
///
/// ```
/// use bairro::search::tokenize;
///
/// assert_eq!(tokenize("Café, pão & CAFÉ!"), vec!["café", "pão"]);
/// ```
pub fn tokenize(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
    {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Lexical score of one record for a set of tokens.
pub fn lexical_score(record: &Record, tokens: &[String]) -> u32 {
    let blob = record.searchable_text();
    let name = record.name.to_lowercase();
    let highlights: Vec<String> = record.highlights.iter().map(|h| h.to_lowercase()).collect();

    tokens
        .iter()
        .filter(|token| blob.contains(token.as_str()))
        .map(|token| {
            let mut score = BLOB_WEIGHT;
            if name.contains(token.as_str()) {
                score += NAME_BONUS;
            }
            if highlights.iter().any(|h| h.contains(token.as_str())) {
                score += HIGHLIGHT_BONUS;
            }
            score
        })
        .sum()
}

/// Rank records against a free-text query and keep the best `k`.
///
/// An empty query, or one no record matches, yields the first `k` records
/// in dataset order with a score of 0.
pub fn search_records(records: &[Record], query: &str, k: usize) -> Vec<ScoredRecord> {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        debug!("empty query, returning first {} records", k);
        return first_k(records, k);
    }

    let mut results: Vec<ScoredRecord> = records
        .iter()
        .map(|record| ScoredRecord::new(record.clone(), lexical_score(record, &tokens)))
        .filter(|scored| scored.score > 0)
        .collect();

    if results.is_empty() {
        debug!(?tokens, "no lexical matches, falling back to first {} records", k);
        return first_k(records, k);
    }

    sort_by_score(&mut results);
    results.truncate(k);

    debug!(?tokens, returned = results.len(), "lexical search complete");
    results
}

fn first_k(records: &[Record], k: usize) -> Vec<ScoredRecord> {
    records
        .iter()
        .take(k)
        .map(|record| ScoredRecord::new(record.clone(), 0))
        .collect()
}
