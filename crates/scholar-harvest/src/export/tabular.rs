//! Plain CSV and JSON dumps of result rows.

use super::finish_csv;
use crate::error::ExportResult;
use crate::models::RecordRow;

/// CSV header, matching the stored column order.
pub const COLUMNS: [&str; 20] = [
    "id",
    "title",
    "authors",
    "year",
    "source",
    "url",
    "doi",
    "abstract",
    "pdf_url",
    "license_type",
    "relevance_score",
    "document_type",
    "journal",
    "publisher",
    "pages",
    "volume",
    "issue",
    "isbn",
    "bibtex_key",
    "date_added",
];

/// Rows as CSV with a header line, even when there are no rows.
///
/// # Errors
///
/// Returns error if a row cannot be serialized.
pub fn render_csv(rows: &[RecordRow]) -> ExportResult<String> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    finish_csv(writer)
}

/// Rows as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn render_json(rows: &[RecordRow]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
