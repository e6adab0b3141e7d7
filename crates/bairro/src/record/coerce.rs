//! Lenient field coercion for hand-edited and model-generated datasets.
//!
//! Malformed values are mapped to the nearest neutral value instead of
//! failing the whole load: `null` becomes empty, a scalar where a list is
//! expected becomes a list, unrecognised answers become `Unknown`.

use indexmap::IndexSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::types::{PriceLevel, TriState};

/// Separators accepted inside a scalar list value (`"japanese; ramen"`).
const LIST_SEPARATORS: &[char] = &[',', ';'];

/// Split a scalar list value into trimmed, non-blank items.
pub(crate) fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(LIST_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn tri_state(value: &Value) -> TriState {
    match value {
        Value::Null => TriState::Unknown,
        Value::Bool(b) => TriState::from_option(Some(*b)),
        Value::String(s) => TriState::parse_lenient(s),
        Value::Number(n) => match n.as_i64() {
            Some(1) => TriState::Yes,
            Some(0) => TriState::No,
            _ => TriState::Unknown,
        },
        other => {
            warn!(value = %other, "unrecognised yes/no value, treating as unknown");
            TriState::Unknown
        }
    }
}

pub(crate) fn tag_set_from_value(value: &Value) -> IndexSet<String> {
    match value {
        Value::Null => IndexSet::new(),
        Value::String(s) => split_list(s).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::Number(n) => {
            warn!(value = %n, "number where a list was expected, keeping it as one tag");
            std::iter::once(n.to_string()).collect()
        }
        other => {
            warn!(value = %other, "unexpected list value, treating as empty");
            IndexSet::new()
        }
    }
}

pub(crate) fn text_list_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        other => scalar_to_string(other)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
    }
}

pub(crate) fn optional_text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Some(joined).filter(|s| !s.trim().is_empty())
        }
        other => scalar_to_string(other).filter(|s| !s.trim().is_empty()),
    }
}

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
}

/// Required text: anything that is not a scalar becomes an empty string.
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = raw(deserializer)?;
    Ok(scalar_to_string(&value).unwrap_or_default())
}

pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(optional_text_from_value(&raw(deserializer)?))
}

pub(crate) fn tag_set<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<IndexSet<String>, D::Error> {
    Ok(tag_set_from_value(&raw(deserializer)?))
}

pub(crate) fn text_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(text_list_from_value(&raw(deserializer)?))
}

pub(crate) fn price_level<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<PriceLevel>, D::Error> {
    let value = raw(deserializer)?;
    match &value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => match s.parse() {
            Ok(level) => Ok(Some(level)),
            Err(_) => {
                warn!(price = %s, "unrecognised price level, leaving it unset");
                Ok(None)
            }
        },
        other => {
            warn!(price = %other, "unrecognised price level, leaving it unset");
            Ok(None)
        }
    }
}

/// Deserialize any type, falling back to `None` when the value does not fit.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = raw(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(error = %e, "ignoring malformed metadata value");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tag_set_coercion() {
        assert!(tag_set_from_value(&json!(null)).is_empty());
        assert_eq!(tag_set_from_value(&json!("japonesa")).len(), 1);
        let split = tag_set_from_value(&json!("japonesa; ramen"));
        assert_eq!(split.iter().collect::<Vec<_>>(), vec!["japonesa", "ramen"]);
        let mixed = tag_set_from_value(&json!(["vegano", null, 3, " "]));
        assert_eq!(mixed.iter().collect::<Vec<_>>(), vec!["vegano", "3"]);
        assert!(tag_set_from_value(&json!({"a": 1})).is_empty());
    }

    #[test]
    fn test_scalar_tag_set_values() {
        let number = tag_set_from_value(&json!(42));
        assert_eq!(number.iter().collect::<Vec<_>>(), vec!["42"]);
        assert!(tag_set_from_value(&json!(true)).is_empty());
        assert!(tag_set_from_value(&json!(" ; ,")).is_empty());
    }

    #[test]
    fn test_tri_state_coercion() {
        assert_eq!(tri_state(&json!(true)), TriState::Yes);
        assert_eq!(tri_state(&json!(null)), TriState::Unknown);
        assert_eq!(tri_state(&json!("não")), TriState::No);
        assert_eq!(tri_state(&json!(0)), TriState::No);
        assert_eq!(tri_state(&json!([true])), TriState::Unknown);
    }

    #[test]
    fn test_optional_text_coercion() {
        assert_eq!(optional_text_from_value(&json!(null)), None);
        assert_eq!(optional_text_from_value(&json!("  ")), None);
        assert_eq!(optional_text_from_value(&json!(42)), Some("42".to_string()));
        assert_eq!(
            optional_text_from_value(&json!(["Seg-Sex", "12h-15h"])),
            Some("Seg-Sex, 12h-15h".to_string())
        );
    }

    #[test]
    fn test_text_list_keeps_order() {
        let list = text_list_from_value(&json!(["b", "a", "b"]));
        assert_eq!(list, vec!["b", "a", "b"]);
        assert_eq!(text_list_from_value(&json!("único")), vec!["único"]);
    }
}
