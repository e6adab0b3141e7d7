//! Fuzz target for the free-text block parser and merge.

#![no_main]

use libfuzzer_sys::fuzz_target;
use bairro::{merge_records, TextBlockParser};

fuzz_target!(|data: &[u8]| {
    if data.len() > 50_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let parsed = TextBlockParser::new().parse(text);
        let mut existing = Vec::new();
        let first = merge_records(&mut existing, parsed.clone());
        let second = merge_records(&mut existing, parsed);
        assert!(first.added.len() <= existing.len());
        assert!(!second.has_changes());
    }
});
