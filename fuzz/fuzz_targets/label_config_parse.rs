//! Fuzz target for labeling config XML parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the labeling config parser
//! and classifies whatever parses, checking for panics, crashes, or hangs.

#![no_main]

use labelport::classify::classify;
use labelport::schema::label_config::from_label_config_slice;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(schema) = from_label_config_slice(data) {
        let _ = classify(&schema);
    }
});
