//! Fuzz target for annotation record parsing.
//!
//! Covers both prepared records and task exports, which are expanded into
//! records along the way. Output values are prettified as the PULC writer
//! would.

#![no_main]

use labelport::records::fuzz_prettify_records;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_prettify_records(data);
});
