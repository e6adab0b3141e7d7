//! The restaurant record.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::merge::MergeField;

use super::coerce;
use super::types::{PriceLevel, RecordSource, TriState};

/// One restaurant in a dataset.
///
/// Every field except `name` may be missing. Missing list fields are empty,
/// missing yes/no fields are [`TriState::Unknown`] and missing text fields
/// are `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Display name; its case-folded form is the merge identity.
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: String,

    /// Cuisine tags (e.g. "japonesa", "ramen").
    #[serde(
        default,
        deserialize_with = "coerce::tag_set",
        skip_serializing_if = "IndexSet::is_empty"
    )]
    pub cuisine: IndexSet<String>,

    #[serde(
        default,
        deserialize_with = "coerce::price_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_level: Option<PriceLevel>,

    /// Whether meal vouchers are accepted.
    #[serde(default)]
    pub accepts_voucher: TriState,

    /// Dietary accommodation tags (e.g. "vegano", "sem glúten").
    #[serde(
        default,
        deserialize_with = "coerce::tag_set",
        skip_serializing_if = "IndexSet::is_empty"
    )]
    pub diet_options: IndexSet<String>,

    /// Whether the venue is wheelchair accessible.
    #[serde(default)]
    pub accessibility: TriState,

    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours: Option<String>,

    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,

    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub neighborhood: Option<String>,

    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Short selling points, in display order.
    #[serde(
        default,
        deserialize_with = "coerce::text_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub highlights: Vec<String>,

    /// How the record entered the dataset.
    #[serde(
        default,
        deserialize_with = "coerce::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<RecordSource>,

    /// When the record was imported or last filled in by a merge.
    #[serde(
        default,
        deserialize_with = "coerce::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Case-folded merge key for a restaurant name.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Record {
    /// Create a record with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_cuisine<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cuisine = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_price(mut self, price: PriceLevel) -> Self {
        self.price_level = Some(price);
        self
    }

    pub fn with_voucher(mut self, accepts: TriState) -> Self {
        self.accepts_voucher = accepts;
        self
    }

    pub fn with_diet_options<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diet_options = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_accessibility(mut self, accessible: TriState) -> Self {
        self.accessibility = accessible;
        self
    }

    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = Some(hours.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = Some(neighborhood.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_highlights<I, S>(mut self, highlights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlights = highlights.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_source(mut self, source: RecordSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Case-folded name used as the merge identity.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    /// Whether the record carries a usable name.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Whether a mergeable field is empty and may be filled by an import.
    pub fn is_blank(&self, field: MergeField) -> bool {
        field.is_blank(self)
    }

    /// Check for a cuisine tag, ignoring case.
    pub fn has_cuisine(&self, tag: &str) -> bool {
        contains_folded(&self.cuisine, tag)
    }

    /// Check for a dietary tag, ignoring case.
    pub fn has_diet_option(&self, tag: &str) -> bool {
        contains_folded(&self.diet_options, tag)
    }

    /// Lowercased text blob searched by lexical queries.
    ///
    /// Covers name, address, neighborhood, cuisine, price, highlights,
    /// description and hours. Missing fields contribute nothing.
    pub fn searchable_text(&self) -> String {
        let cuisine = self.cuisine.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
        let highlights = self.highlights.join(" ");
        let parts = [
            self.name.as_str(),
            self.address.as_deref().unwrap_or(""),
            self.neighborhood.as_deref().unwrap_or(""),
            cuisine.as_str(),
            self.price_level.map(|p| p.symbol()).unwrap_or(""),
            highlights.as_str(),
            self.description.as_deref().unwrap_or(""),
            self.hours.as_deref().unwrap_or(""),
        ];
        parts
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}

fn contains_folded(tags: &IndexSet<String>, wanted: &str) -> bool {
    let wanted = wanted.trim().to_lowercase();
    tags.iter().any(|t| t.trim().to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "name": "Jojo Ramen (Pinheiros)",
            "cuisine": ["japonesa", "ramen"],
            "price_level": "$$",
            "accepts_voucher": true,
            "diet_options": ["vegetariano"],
            "accessibility": null,
            "hours": "12h-23h",
            "highlights": ["Tonkotsu", "Gyoza"],
            "image": "ignored.png"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.name, "Jojo Ramen (Pinheiros)");
        assert!(record.has_cuisine("RAMEN"));
        assert_eq!(record.price_level, Some(PriceLevel::Moderate));
        assert_eq!(record.accepts_voucher, TriState::Yes);
        assert_eq!(record.accessibility, TriState::Unknown);
        assert_eq!(record.highlights.len(), 2);
        assert!(record.address.is_none());
    }

    #[test]
    fn test_missing_fields_use_neutral_defaults() {
        let record: Record = serde_json::from_str(r#"{"name": "Arlete"}"#).unwrap();

        assert!(record.cuisine.is_empty());
        assert!(record.diet_options.is_empty());
        assert_eq!(record.accepts_voucher, TriState::Unknown);
        assert_eq!(record.accessibility, TriState::Unknown);
        assert!(record.price_level.is_none());
        assert!(record.source.is_none());
    }

    #[test]
    fn test_malformed_fields_are_coerced() {
        let json = r#"{
            "name": "Momokuri",
            "cuisine": "japonesa",
            "diet_options": null,
            "price_level": "caro",
            "accepts_voucher": "Sim",
            "highlights": null,
            "description": null,
            "source": "somewhere-else",
            "updated_at": "not a date"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.cuisine.len(), 1);
        assert!(record.diet_options.is_empty());
        assert!(record.price_level.is_none());
        assert_eq!(record.accepts_voucher, TriState::Yes);
        assert!(record.highlights.is_empty());
        assert!(record.description.is_none());
        assert!(record.source.is_none());
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn test_unknown_tri_state_survives_round_trip() {
        let record = Record::new("Otoshi").with_voucher(TriState::No);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"accepts_voucher\":false"));
        assert!(json.contains("\"accessibility\":null"));

        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back.accepts_voucher, TriState::No);
        assert_eq!(back.accessibility, TriState::Unknown);
    }

    #[test]
    fn test_name_key_folds_case_and_whitespace() {
        assert_eq!(Record::new("  Pirajá (Faria Lima) ").name_key(), "pirajá (faria lima)");
        assert!(!Record::new("   ").has_name());
    }

    #[test]
    fn test_searchable_text() {
        let record = Record::new("Buzina Burgers")
            .with_cuisine(["Hambúrguer"])
            .with_price(PriceLevel::Moderate)
            .with_address("Rua dos Pinheiros, 1")
            .with_highlights(["Smash burger"]);
        let blob = record.searchable_text();

        assert!(blob.contains("buzina burgers"));
        assert!(blob.contains("hambúrguer"));
        assert!(blob.contains("$$"));
        assert!(blob.contains("smash burger"));
        assert!(blob.contains("rua dos pinheiros"));
    }
}
