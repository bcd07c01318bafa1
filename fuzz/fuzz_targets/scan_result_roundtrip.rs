#![no_main]

use libfuzzer_sys::fuzz_target;
use nuscan_core::types::ScanResult;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut result) = ScanResult::from_json(json) else {
        return;
    };

    // 저장 후 다시 읽으면 같은 결과여야 함
    result.sort_packages();
    let saved = result.to_json_pretty().expect("ScanResult always serializes");
    let reparsed = ScanResult::from_json(&saved).expect("saved JSON must reparse");
    assert_eq!(reparsed, result);
});
