//! Structured filter mode.
//!
//! Each constraint is either "don't care" or a concrete value. Constraints
//! are hard filters: a record failing one is excluded, never penalised.
//!
//! | Constraint     | Semantics                                   |
//! |----------------|---------------------------------------------|
//! | cuisine        | record has at least one selected tag (OR)   |
//! | price          | exact tier match                            |
//! | voucher        | [`Requirement`] over a tri-state field      |
//! | diet           | record has every selected tag (AND)         |
//! | accessibility  | [`Requirement`] over a tri-state field      |

mod criteria;
mod engine;
mod scored;

pub use criteria::{FilterCriteria, Requirement};
pub use engine::filter_records;
pub use scored::{sort_by_score, top_k, ScoredRecord};
