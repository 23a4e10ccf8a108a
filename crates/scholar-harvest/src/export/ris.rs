//! RIS (EndNote) rendering.

use crate::models::field::collapse_whitespace;
use crate::models::{RecordRow, non_empty};

/// Entry terminator line.
pub const END_OF_RECORD: &str = "ER  - ";

/// RIS `TY` code for a document type label.
#[must_use]
pub fn type_code(document_type: &str) -> &'static str {
    let label = document_type.to_lowercase();
    if label.contains("book") {
        "BOOK"
    } else if label.contains("thesis") || label.contains("dissertation") {
        "THES"
    } else if label.contains("conference") {
        "CONF"
    } else {
        "JOUR"
    }
}

/// Render rows as RIS records in input order.
///
/// Every record ends with `ER  - ` followed by one blank line.
#[must_use]
pub fn render(rows: &[RecordRow]) -> String {
    rows.iter().map(render_entry).collect()
}

/// Render one record.
///
/// `TY`, `TI`, `UR` and `AB` are always written, even with an empty value.
#[must_use]
pub fn render_entry(row: &RecordRow) -> String {
    let mut lines = vec![tag("TY", type_code(&row.document_type))];
    lines.push(tag("TI", &collapse_whitespace(&row.title)));
    if let Some(year) = row.year {
        lines.push(tag("PY", &year.to_string()));
    }
    lines.push(tag("UR", &collapse_whitespace(&row.url)));
    lines.push(tag("AB", &collapse_whitespace(&row.r#abstract)));
    for author in row.author_list() {
        push(&mut lines, "AU", author);
    }
    for (name, value) in [
        ("JO", &row.journal),
        ("PB", &row.publisher),
        ("VL", &row.volume),
        ("IS", &row.issue),
        ("SP", &row.pages),
        ("DO", &row.doi),
    ] {
        if let Some(value) = non_empty(value.as_ref()) {
            push(&mut lines, name, value);
        }
    }
    lines.push(END_OF_RECORD.to_string());

    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out
}

fn tag(name: &str, value: &str) -> String {
    format!("{name}  - {value}")
}

fn push(lines: &mut Vec<String>, name: &str, value: &str) {
    let value = collapse_whitespace(value);
    if !value.is_empty() {
        lines.push(tag(name, &value));
    }
}
