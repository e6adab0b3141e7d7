//! Fuzz target for the pipe-delimited dataset parser.
//!
//! The parser must never panic, and every record it returns has a name.

#![no_main]

use libfuzzer_sys::fuzz_target;
use bairro::store::{parse_pipe, to_pipe_string};

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(records) = parse_pipe(text) {
            assert!(records.iter().all(|r| r.has_name()));

            // Writing back must produce something the parser accepts again
            let rewritten = to_pipe_string(&records);
            let _ = parse_pipe(&rewritten);
        }
    }
});
