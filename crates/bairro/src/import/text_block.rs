//! Deterministic parser for pasted restaurant descriptions.
//!
//! Input is free text made of blocks separated by blank lines:
//!
//! ```text
//! Jojo Ramen
//! Culinária: japonesa, ramen
//! Preço: $$
//! Vale refeição: sim
//! Destaques:
//! - Tonkotsu
//! - Gyoza
//!
//! Nome: Momokuri
//! Cuisine: japanese
//! Accessibility: no
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::record::{split_list, Record, RecordSource, TriState};

/// `Key: value` with a short key.
static KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^:]{1,40}?)\s*:\s*(.*?)\s*$").expect("valid regex"));

/// Bulleted list item.
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+(.+?)\s*$").expect("valid regex"));

/// Numbering or bullet in front of a bare name line.
static NAME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+[.)]|[-•])\s*").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextKey {
    Name,
    Cuisine,
    Price,
    Voucher,
    Diet,
    Accessibility,
    Hours,
    Address,
    Neighborhood,
    Description,
    Highlights,
}

impl TextKey {
    fn parse(raw: &str) -> Option<Self> {
        let key = raw
            .trim()
            .trim_matches(|c: char| c == '*' || c == '?' || c == '-')
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ");

        let key = match key.as_str() {
            "name" | "nome" | "restaurant" | "restaurante" => TextKey::Name,
            "cuisine" | "cuisines" | "culinária" | "culinaria" | "tipo de culinária"
            | "tipo de culinaria" | "cozinha" => TextKey::Cuisine,
            "price" | "price level" | "preço" | "preco" | "faixa de preço" | "faixa de preco" => {
                TextKey::Price
            }
            "voucher" | "accepts voucher" | "meal voucher" | "vale refeição" | "vale refeicao"
            | "aceita vale refeição" | "aceita vale refeicao" | "vr" => TextKey::Voucher,
            "diet" | "diet options" | "dietary" | "dieta" | "restrições" | "restricoes"
            | "restrições alimentares" | "restricoes alimentares" | "opções para restrições" => {
                TextKey::Diet
            }
            "accessibility" | "accessible" | "acessibilidade" | "acessível" | "acessivel" => {
                TextKey::Accessibility
            }
            "hours" | "opening hours" | "horário" | "horario" | "horários" | "horarios"
            | "funcionamento" => TextKey::Hours,
            "address" | "endereço" | "endereco" => TextKey::Address,
            "neighborhood" | "neighbourhood" | "bairro" => TextKey::Neighborhood,
            "description" | "descrição" | "descricao" | "sobre" => TextKey::Description,
            "highlights" | "destaques" | "destaque" => TextKey::Highlights,
            _ => return None,
        };
        Some(key)
    }

    fn takes_items(&self) -> bool {
        matches!(self, TextKey::Cuisine | TextKey::Diet | TextKey::Highlights)
    }
}

/// Parser for blank-line separated restaurant blocks.
#[derive(Debug, Clone)]
pub struct TextBlockParser {
    source: RecordSource,
}

impl TextBlockParser {
    /// Create a parser that tags records as offline imports.
    pub fn new() -> Self {
        Self {
            source: RecordSource::OfflineImport,
        }
    }

    /// Tag parsed records with a different source.
    pub fn with_source(mut self, source: RecordSource) -> Self {
        self.source = source;
        self
    }

    /// Parse every block into a record.
    ///
    /// Blocks that never state a name still produce a record with an empty
    /// name, so a merge reports them instead of dropping them silently.
    pub fn parse(&self, text: &str) -> Vec<Record> {
        let records: Vec<Record> = split_blocks(text)
            .into_iter()
            .map(|block| self.parse_block(&block))
            .collect();
        debug!(records = records.len(), "parsed text blocks");
        records
    }

    fn parse_block(&self, lines: &[&str]) -> Record {
        let mut record = Record::default().with_source(self.source);
        let mut current: Option<TextKey> = None;

        for (position, line) in lines.iter().enumerate() {
            if let Some(key) = current.filter(TextKey::takes_items) {
                if let Some(caps) = LIST_ITEM.captures(line) {
                    push_item(&mut record, key, &caps[1]);
                    continue;
                }
            }

            if let Some(caps) = KEY_VALUE.captures(line) {
                if let Some(key) = TextKey::parse(&caps[1]) {
                    apply(&mut record, key, &caps[2]);
                    current = Some(key);
                    continue;
                }
            }

            if position == 0 && !record.has_name() {
                record.name = clean_name(line);
                continue;
            }

            if current == Some(TextKey::Description) {
                let extra = line.trim();
                let description = record.description.get_or_insert_with(String::new);
                if !description.is_empty() {
                    description.push(' ');
                }
                description.push_str(extra);
                continue;
            }

            debug!(line = %line.trim(), "ignoring unrecognised line");
        }

        if !record.has_name() {
            warn!("text block without a restaurant name");
        }
        record
    }
}

impl Default for TextBlockParser {
    fn default() -> Self {
        Self::new()
    }
}

fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        let separator = !trimmed.is_empty() && trimmed.chars().all(|c| c == '-' || c == '=');
        if trimmed.is_empty() || separator {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Strip markdown headings, emphasis and list numbering from a name.
fn clean_name(line: &str) -> String {
    let name = line.trim().trim_start_matches('#').trim().trim_matches('*').trim();
    let name = NAME_PREFIX.replace(name, "");
    name.trim().trim_matches('*').trim().to_string()
}

/// First word of a yes/no answer ("Sim, aceita VR" is yes).
fn parse_answer(value: &str) -> TriState {
    value
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .map(TriState::parse_lenient)
        .unwrap_or_default()
}

fn apply(record: &mut Record, key: TextKey, value: &str) {
    let text = Some(value.to_string()).filter(|v| !v.is_empty());
    match key {
        TextKey::Name => record.name = clean_name(value),
        TextKey::Cuisine => record.cuisine.extend(split_list(value)),
        TextKey::Price => {
            record.price_level = value.parse().ok();
            if record.price_level.is_none() && !value.is_empty() {
                warn!(price = value, "unrecognised price level in text import");
            }
        }
        TextKey::Voucher => record.accepts_voucher = parse_answer(value),
        TextKey::Diet => record.diet_options.extend(split_list(value)),
        TextKey::Accessibility => record.accessibility = parse_answer(value),
        TextKey::Hours => record.hours = text,
        TextKey::Address => record.address = text,
        TextKey::Neighborhood => record.neighborhood = text,
        TextKey::Description => record.description = text,
        TextKey::Highlights => record.highlights.extend(split_list(value)),
    }
}

fn push_item(record: &mut Record, key: TextKey, item: &str) {
    let item = item.trim().to_string();
    match key {
        TextKey::Cuisine => {
            record.cuisine.insert(item);
        }
        TextKey::Diet => {
            record.diet_options.insert(item);
        }
        TextKey::Highlights => record.highlights.push(item),
        _ => {}
    }
}
