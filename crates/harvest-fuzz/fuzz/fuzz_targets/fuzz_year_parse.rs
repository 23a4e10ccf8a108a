#![no_main]

use libfuzzer_sys::fuzz_target;
use scholar_harvest::models::{YearValue, parse_year};

fuzz_target!(|data: &[u8]| {
    // Any JSON shape a year field might take; only four-digit years come out
    if let Ok(value) = serde_json::from_slice::<YearValue>(data) {
        if let Some(year) = parse_year(&value) {
            assert!((1000..=9999).contains(&year));
        }
    }
});
