//! Fields that an import may fill in on an existing record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{Record, TriState};

/// A field the merge engine may fill in on an existing record.
///
/// `name` is the identity and is never merged; provenance is bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeField {
    Address,
    Hours,
    PriceLevel,
    Highlights,
    Description,
    Neighborhood,
    Cuisine,
    AcceptsVoucher,
    DietOptions,
    Accessibility,
}

impl MergeField {
    /// Every mergeable field, in comparison order.
    pub const ALL: [MergeField; 10] = [
        MergeField::Address,
        MergeField::Hours,
        MergeField::PriceLevel,
        MergeField::Highlights,
        MergeField::Description,
        MergeField::Neighborhood,
        MergeField::Cuisine,
        MergeField::AcceptsVoucher,
        MergeField::DietOptions,
        MergeField::Accessibility,
    ];

    /// Field name as it appears in the JSON dataset.
    pub fn name(&self) -> &'static str {
        match self {
            MergeField::Address => "address",
            MergeField::Hours => "hours",
            MergeField::PriceLevel => "price_level",
            MergeField::Highlights => "highlights",
            MergeField::Description => "description",
            MergeField::Neighborhood => "neighborhood",
            MergeField::Cuisine => "cuisine",
            MergeField::AcceptsVoucher => "accepts_voucher",
            MergeField::DietOptions => "diet_options",
            MergeField::Accessibility => "accessibility",
        }
    }

    /// Whether this field is empty on `record`.
    ///
    /// Blank means absent or whitespace-only text, an empty list, an unset
    /// price, or an `Unknown` yes/no value.
    pub fn is_blank(&self, record: &Record) -> bool {
        match self {
            MergeField::Address => blank_text(&record.address),
            MergeField::Hours => blank_text(&record.hours),
            MergeField::PriceLevel => record.price_level.is_none(),
            MergeField::Highlights => record.highlights.is_empty(),
            MergeField::Description => blank_text(&record.description),
            MergeField::Neighborhood => blank_text(&record.neighborhood),
            MergeField::Cuisine => record.cuisine.is_empty(),
            MergeField::AcceptsVoucher => record.accepts_voucher == TriState::Unknown,
            MergeField::DietOptions => record.diet_options.is_empty(),
            MergeField::Accessibility => record.accessibility == TriState::Unknown,
        }
    }

    /// Copy this field's value from `source` into `target`.
    pub(crate) fn copy(&self, source: &Record, target: &mut Record) {
        match self {
            MergeField::Address => target.address = source.address.clone(),
            MergeField::Hours => target.hours = source.hours.clone(),
            MergeField::PriceLevel => target.price_level = source.price_level,
            MergeField::Highlights => target.highlights = source.highlights.clone(),
            MergeField::Description => target.description = source.description.clone(),
            MergeField::Neighborhood => target.neighborhood = source.neighborhood.clone(),
            MergeField::Cuisine => target.cuisine = source.cuisine.clone(),
            MergeField::AcceptsVoucher => target.accepts_voucher = source.accepts_voucher,
            MergeField::DietOptions => target.diet_options = source.diet_options.clone(),
            MergeField::Accessibility => target.accessibility = source.accessibility,
        }
    }
}

impl fmt::Display for MergeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn blank_text(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}
