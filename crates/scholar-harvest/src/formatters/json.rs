//! JSON output formatting for the command line.

use serde_json::{Value, json};

use crate::models::{RecordRow, non_empty};

/// Create a compact record representation for JSON output.
///
/// Optional fields appear only when they hold a value.
#[must_use]
pub fn compact_record(row: &RecordRow) -> Value {
    let mut obj = json!({
        "id": row.id,
        "key": row.citation_key(),
        "title": row.title,
        "authors": row.author_list(),
        "year": row.year,
        "source": row.source,
        "type": row.document_type,
        "relevance": row.relevance_score,
    });

    if !row.url.is_empty() {
        obj["url"] = json!(row.url);
    }

    for (name, value) in [
        ("doi", &row.doi),
        ("pdf", &row.pdf_url),
        ("journal", &row.journal),
        ("publisher", &row.publisher),
    ] {
        if let Some(value) = non_empty(value.as_ref()) {
            obj[name] = json!(value);
        }
    }

    obj
}

/// Compact representation of a whole result set.
#[must_use]
pub fn compact_records(rows: &[RecordRow]) -> Value {
    Value::Array(rows.iter().map(compact_record).collect())
}
