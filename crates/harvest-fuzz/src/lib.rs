//! Fuzzing library for scholar-harvest.
//!
//! This crate provides fuzzing targets for the source extractors: the
//! arXiv Atom parser and the CrossRef / Internet Archive JSON walkers.
//!
//! # Usage
//!
//! ```bash
//! cd crates/harvest-fuzz
//! cargo +nightly fuzz run fuzz_arxiv_feed -- -max_total_time=60
//! ```

pub use scholar_harvest::sources;
