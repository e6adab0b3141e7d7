//! Fuzz target for the JSON dataset loader.
//!
//! Malformed fields are coerced; only a broken document may fail.

#![no_main]

use libfuzzer_sys::fuzz_target;
use bairro::Dataset;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(dataset) = Dataset::from_json_str(text) {
            let _ = dataset.cuisines();
            let _ = serde_json::to_string(&dataset.records);
        }
    }
});
