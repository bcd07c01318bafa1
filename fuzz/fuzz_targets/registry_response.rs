#![no_main]

use libfuzzer_sys::fuzz_target;
use nuscan_registry::protocol::{v2, v3};
use nuscan_registry::PackageEntry;

fuzz_target!(|data: &[u8]| {
    if let Ok(body) = std::str::from_utf8(data) {
        if let Ok(feed) = v2::parse_feed(body) {
            let _: Vec<PackageEntry> = feed.entries.into_iter().map(PackageEntry::from).collect();
        }
        if let Ok(response) = serde_json::from_str::<v3::SearchResponse>(body) {
            let _: Vec<PackageEntry> = response.data.into_iter().map(PackageEntry::from).collect();
        }
        let _ = serde_json::from_str::<v3::ServiceIndex>(body).map(|index| index.search_query_service().map(str::to_owned));
    }
});
