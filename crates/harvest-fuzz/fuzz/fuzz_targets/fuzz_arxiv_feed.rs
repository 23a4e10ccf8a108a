#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_harvest::models::Source;
use scholar_harvest::pipeline::assemble;
use scholar_harvest::sources::arxiv;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text must parse or fail cleanly, and whatever parses must assemble
    if let Ok(xml) = std::str::from_utf8(data) {
        if let Ok(candidates) = arxiv::extract_feed(xml) {
            let _ = assemble(Source::Arxiv, candidates);
        }
    }
});
