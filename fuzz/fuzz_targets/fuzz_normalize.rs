#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz log normalization.
///
/// Feeds arbitrary UTF-8 strings to `parse_log_str`. Anything that parses as
/// JSON goes through shape detection and both `assets` converters, and the
/// result is diffed against itself.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(snapshot) = bundle_log_tools::parsers::parse_log_str(s) {
            assert!(bundle_log_tools::diff::diff(&snapshot, &snapshot).is_empty());
        }
    }
});
