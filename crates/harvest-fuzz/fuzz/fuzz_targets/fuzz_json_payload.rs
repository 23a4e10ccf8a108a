#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_harvest::models::Source;
use scholar_harvest::pipeline::assemble;
use scholar_harvest::sources::{archive, crossref, ndltd};

fuzz_target!(|data: &[u8]| {
    // First try to parse as valid JSON
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        // Then walk it as each source's payload
        if let Ok(candidates) = crossref::extract(&json) {
            let _ = assemble(Source::Crossref, candidates);
        }
        if let Ok(candidates) = archive::extract(&json) {
            let _ = assemble(Source::InternetArchive, candidates);
        }
        let _ = ndltd::records_from_payload(&json);
    }
});
