//! Structured filtering: hard constraints, then a uniform score.

use tracing::debug;

use crate::record::Record;

use super::criteria::FilterCriteria;
use super::scored::{sort_by_score, ScoredRecord};

/// Filter records against structured criteria.
///
/// A record failing any active constraint is dropped. Every active
/// constraint a surviving record passes adds one to its score, so within a
/// single query all results carry the same score (the number of active
/// constraints). Results are sorted by descending score with dataset order
/// preserved for ties. The input is never modified.
///
/// # Example
///
/// ```
/// use bairro::{filter_records, FilterCriteria, PriceLevel, Record, Requirement, TriState};
///
/// let data = vec![Record::new("A").with_price(PriceLevel::Moderate).with_voucher(TriState::Yes)];
///
/// let criteria = FilterCriteria::new()
///     .with_price(PriceLevel::Moderate)
///     .with_voucher(Requirement::Required);
/// let results = filter_records(&data, &criteria);
/// assert_eq!(results[0].name(), "A");
/// assert_eq!(results[0].score, 2);
///
/// let cheaper = FilterCriteria::new().with_price(PriceLevel::Budget);
/// assert!(filter_records(&data, &cheaper).is_empty());
/// ```
pub fn filter_records(records: &[Record], criteria: &FilterCriteria) -> Vec<ScoredRecord> {
    let mut results: Vec<ScoredRecord> = records
        .iter()
        .filter_map(|record| {
            evaluate(record, criteria).map(|score| ScoredRecord::new(record.clone(), score))
        })
        .collect();

    sort_by_score(&mut results);

    debug!(
        candidates = records.len(),
        matched = results.len(),
        active_constraints = criteria.active_count(),
        "structured filter complete"
    );

    results
}

/// Score a record, or `None` if any active constraint rejects it.
fn evaluate(record: &Record, criteria: &FilterCriteria) -> Option<u32> {
    let mut score = 0;

    if criteria.cuisine_active() {
        let wanted = non_blank(&criteria.cuisines);
        if !wanted.iter().any(|c| record.has_cuisine(c)) {
            return None;
        }
        score += 1;
    }

    if let Some(price) = criteria.price {
        if record.price_level != Some(price) {
            return None;
        }
        score += 1;
    }

    if criteria.voucher.is_active() {
        if !criteria.voucher.accepts(record.accepts_voucher) {
            return None;
        }
        score += 1;
    }

    if criteria.diet_active() {
        let required = non_blank(&criteria.diets);
        if !required.iter().all(|d| record.has_diet_option(d)) {
            return None;
        }
        score += 1;
    }

    if criteria.accessibility.is_active() {
        if !criteria.accessibility.accepts(record.accessibility) {
            return None;
        }
        score += 1;
    }

    Some(score)
}

fn non_blank(tags: &[String]) -> Vec<&str> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect()
}
