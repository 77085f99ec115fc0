//! Fuzz target for schema JSON parsing.

#![no_main]

use labelport::schema::io_json::from_schema_json_slice;
use labelport::schema::LabelConfig;
use labelport::select::supported_formats;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(schema) = from_schema_json_slice(data) {
        let _ = supported_formats(&LabelConfig::new(schema, None));
    }
});
