#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use nuscan_registry::locator::parse_package_sources;

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        if let Ok(sources) = parse_package_sources(xml, Path::new("fuzz/NuGet.config")) {
            assert!(sources.iter().all(|s| !s.endpoint_url.is_empty()));
        }
    }
});
