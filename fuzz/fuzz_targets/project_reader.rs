#![no_main]

use libfuzzer_sys::fuzz_target;
use nuscan_scanner::parse_project;

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        if let Ok(references) = parse_project(xml) {
            assert!(references.iter().all(|r| !r.id.is_empty()));
        }
    }
});
