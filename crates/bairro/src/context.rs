//! Context snippets handed to a language model.
//!
//! The snippet lists every field of each selected record, so the model sees
//! "not specified" instead of guessing, and is bounded in size.

use serde::{Deserialize, Serialize};

use crate::record::{Record, TriState};

const NOT_SPECIFIED: &str = "not specified";

/// Size limits for a context snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnippetLimits {
    /// Maximum number of records included.
    pub max_records: usize,
    /// Maximum snippet length in characters.
    pub max_chars: usize,
    /// Maximum length of any single text field.
    pub max_field_chars: usize,
}

impl Default for SnippetLimits {
    fn default() -> Self {
        Self {
            max_records: 5,
            max_chars: 4000,
            max_field_chars: 400,
        }
    }
}

/// Render records as a bounded, field-complete text block.
///
/// Records are emitted in the given order. A record that would push the
/// snippet past `max_chars` is left out along with everything after it;
/// a single oversized first record is cut at the limit.
pub fn context_snippet<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    limits: &SnippetLimits,
) -> String {
    let mut snippet = String::new();
    let mut used = 0;

    for record in records.into_iter().take(limits.max_records) {
        let block = record_block(record, limits.max_field_chars);
        let separator = if snippet.is_empty() { 0 } else { 2 };
        let len = block.chars().count();

        if used + separator + len > limits.max_chars {
            if snippet.is_empty() {
                snippet = truncate_chars(&block, limits.max_chars);
            }
            break;
        }

        if separator > 0 {
            snippet.push_str("\n\n");
        }
        snippet.push_str(&block);
        used += separator + len;
    }

    snippet
}

fn record_block(record: &Record, max_field: usize) -> String {
    let text = |value: Option<&str>| {
        value
            .filter(|v| !v.trim().is_empty())
            .map(|v| truncate_chars(v.trim(), max_field))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    };
    let list = |items: Vec<&str>, sep: &str| {
        if items.is_empty() {
            NOT_SPECIFIED.to_string()
        } else {
            truncate_chars(&items.join(sep), max_field)
        }
    };

    let lines = [
        format!("## {}", record.name.trim()),
        format!("- Cuisine: {}", list(record.cuisine.iter().map(String::as_str).collect(), ", ")),
        format!(
            "- Price: {}",
            record.price_level.map(|p| p.symbol()).unwrap_or(NOT_SPECIFIED)
        ),
        format!("- Meal voucher: {}", record.accepts_voucher.describe("meal vouchers")),
        format!(
            "- Diet options: {}",
            list(record.diet_options.iter().map(String::as_str).collect(), ", ")
        ),
        format!("- Accessibility: {}", accessibility_label(record.accessibility)),
        format!("- Hours: {}", text(record.hours.as_deref())),
        format!("- Address: {}", text(record.address.as_deref())),
        format!("- Neighborhood: {}", text(record.neighborhood.as_deref())),
        format!(
            "- Highlights: {}",
            list(record.highlights.iter().map(String::as_str).collect(), "; ")
        ),
        format!("- Description: {}", text(record.description.as_deref())),
    ];

    lines.join("\n")
}

/// Display label for the accessibility field.
pub fn accessibility_label(value: TriState) -> &'static str {
    match value {
        TriState::Yes => "accessible",
        TriState::No => "not accessible",
        TriState::Unknown => NOT_SPECIFIED,
    }
}

/// System prompt shared by every provider.
pub fn system_prompt() -> &'static str {
    r#"You are a local guide recommending restaurants in a single neighborhood.
Answer only from the restaurant list you are given. When a detail is marked
"not specified", say that it is unknown instead of guessing. If nothing in the
list fits the question, say so plainly. Keep answers short and practical."#
}

/// Build the prompt for a conversational question.
pub fn question_prompt(question: &str, snippet: &str) -> String {
    let listing = if snippet.trim().is_empty() {
        "No restaurants available."
    } else {
        snippet
    };

    format!(
        r#"## Restaurants
{}

## Question
{}

## Task
Recommend the restaurants from the list above that best answer the question.
Mention each recommendation by name and explain briefly why it fits."#,
        listing,
        question.trim()
    )
}

/// Build the prompt asking for structured records from free text.
pub fn extraction_prompt(text: &str) -> String {
    format!(
        r#"Extract every restaurant described in the text below.

## Text
{}

## Task
Respond with a JSON array only. Each element is an object with these keys:
- "name": string (required)
- "cuisine": array of strings
- "price_level": one of "$", "$$", "$$$" or null
- "accepts_voucher": true, false or null
- "diet_options": array of strings (for example "vegetarian", "vegan", "gluten-free")
- "accessibility": true, false or null
- "hours", "address", "neighborhood", "description": string or null
- "highlights": array of strings

Use null or an empty array when the text does not state a value. Do not invent details."#,
        text.trim()
    )
}

/// Cut `value` to at most `max` characters, marking the cut with `...`.
pub(crate) fn truncate_chars(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(&"..."[..max.min(3)]);
    out
}
