//! Value types shared by restaurant records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::coerce;

/// A yes/no answer that may also be unknown.
///
/// `Unknown` means the source never stated the value. It is never treated
/// as `No`: filters and merges handle all three states explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TriState {
    Yes,
    No,
    #[default]
    Unknown,
}

impl TriState {
    /// Build from an optional boolean (`None` is `Unknown`).
    pub fn from_option(value: Option<bool>) -> Self {
        match value {
            Some(true) => TriState::Yes,
            Some(false) => TriState::No,
            None => TriState::Unknown,
        }
    }

    /// Convert to an optional boolean.
    pub fn as_option(&self) -> Option<bool> {
        match self {
            TriState::Yes => Some(true),
            TriState::No => Some(false),
            TriState::Unknown => None,
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, TriState::Yes)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TriState::Unknown)
    }

    /// Parse free-form answers such as `yes`, `Sim`, `não`, `false` or `1`.
    ///
    /// Anything unrecognised (including blank input) is `Unknown`.
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" | "sim" | "s" | "1" => TriState::Yes,
            "no" | "n" | "false" | "não" | "nao" | "0" => TriState::No,
            _ => TriState::Unknown,
        }
    }

    /// Short label used in pipe files and tables.
    pub fn label(&self) -> &'static str {
        match self {
            TriState::Yes => "yes",
            TriState::No => "no",
            TriState::Unknown => "unknown",
        }
    }

    /// Human-readable sentence fragment for a capability.
    ///
    /// ```
    /// use bairro::TriState;
    ///
    /// assert_eq!(TriState::No.describe("meal vouchers"), "does not accept meal vouchers");
    /// assert_eq!(TriState::Unknown.describe("meal vouchers"), "meal vouchers not specified");
    /// ```
    pub fn describe(&self, subject: &str) -> String {
        match self {
            TriState::Yes => format!("accepts {}", subject),
            TriState::No => format!("does not accept {}", subject),
            TriState::Unknown => format!("{} not specified", subject),
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TriState::Yes => serializer.serialize_bool(true),
            TriState::No => serializer.serialize_bool(false),
            TriState::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for TriState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(coerce::tri_state(value.as_ref().unwrap_or(&Value::Null)))
    }
}

/// Price tier, ordered from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceLevel {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Upscale,
}

impl PriceLevel {
    /// All tiers in ascending order.
    pub const ALL: [PriceLevel; 3] = [PriceLevel::Budget, PriceLevel::Moderate, PriceLevel::Upscale];

    pub fn symbol(&self) -> &'static str {
        match self {
            PriceLevel::Budget => "$",
            PriceLevel::Moderate => "$$",
            PriceLevel::Upscale => "$$$",
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PriceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "$" => Ok(PriceLevel::Budget),
            "$$" => Ok(PriceLevel::Moderate),
            "$$$" => Ok(PriceLevel::Upscale),
            other => Err(format!("Unknown price level: '{}'. Use $, $$ or $$$.", other)),
        }
    }
}

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Entered or curated by hand.
    Manual,
    /// Parsed from text without a language model.
    OfflineImport,
    /// Extracted by a hosted language model.
    ModelImport,
}

impl RecordSource {
    pub fn label(&self) -> &'static str {
        match self {
            RecordSource::Manual => "manual",
            RecordSource::OfflineImport => "offline import",
            RecordSource::ModelImport => "model import",
        }
    }
}
