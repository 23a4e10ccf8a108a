//! Data models for harvested records.
//!
//! Source-specific payload shapes live next to their extractors in
//! [`crate::sources`]; everything here is source-agnostic.

mod enums;
pub mod field;
mod record;

pub use enums::{DocumentType, ExportFormat, LicenseType, Source};
pub use field::{OneOrMany, YearValue, parse_year};
pub use record::{Candidate, RecordRow, UNKNOWN_AUTHOR, UnifiedRecord, non_empty};
