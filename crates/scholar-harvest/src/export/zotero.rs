//! Zotero CSV import format.

use super::finish_csv;
use crate::error::ExportResult;
use crate::models::RecordRow;

/// Column headers, in order.
pub const COLUMNS: [&str; 15] = [
    "Item Type",
    "Title",
    "Author",
    "Year",
    "URL",
    "Abstract",
    "DOI",
    "Publication Title",
    "Publisher",
    "Volume",
    "Issue",
    "Pages",
    "ISBN",
    "Date Added",
    "Manual Tags",
];

/// Tags attached to every imported item.
pub const MANUAL_TAGS: &str = "time series; quantitative analysis";

/// Zotero item type for a document type label.
#[must_use]
pub fn item_type(document_type: &str) -> &'static str {
    match document_type {
        "Book" => "book",
        "Book Chapter" => "bookSection",
        "Conference Paper" => "conferencePaper",
        "Thesis" | "Dissertation" => "thesis",
        "Preprint" => "preprint",
        "Technical Report" => "report",
        _ => "journalArticle",
    }
}

/// Render rows as a Zotero-importable CSV document.
///
/// # Errors
///
/// Returns error if the CSV writer fails.
pub fn render(rows: &[RecordRow]) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;

    for row in rows {
        let year = row.year.map(|y| y.to_string()).unwrap_or_default();
        writer.write_record([
            item_type(&row.document_type),
            row.title.as_str(),
            row.authors.as_str(),
            year.as_str(),
            row.url.as_str(),
            row.r#abstract.as_str(),
            opt(row.doi.as_ref()),
            opt(row.journal.as_ref()),
            opt(row.publisher.as_ref()),
            opt(row.volume.as_ref()),
            opt(row.issue.as_ref()),
            opt(row.pages.as_ref()),
            opt(row.isbn.as_ref()),
            opt(row.date_added.as_ref()),
            MANUAL_TAGS,
        ])?;
    }

    finish_csv(writer)
}

fn opt(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}
