//! BibTeX rendering.

use crate::models::field::collapse_whitespace;
use crate::models::{RecordRow, non_empty};

/// BibTeX entry family for a document type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// `@book`: publisher, isbn.
    Book,
    /// `@phdthesis`: school.
    PhdThesis,
    /// `@mastersthesis`: school.
    MastersThesis,
    /// `@article`: journal, volume, number, pages.
    Article,
}

impl EntryKind {
    /// Pick the entry type from a stored document type label.
    #[must_use]
    pub fn for_document_type(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("book") {
            Self::Book
        } else if label.contains("dissertation") {
            Self::PhdThesis
        } else if label.contains("thesis") {
            Self::MastersThesis
        } else {
            Self::Article
        }
    }

    /// Entry type name without the `@`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::PhdThesis => "phdthesis",
            Self::MastersThesis => "mastersthesis",
            Self::Article => "article",
        }
    }
}

/// Render rows as BibTeX entries, one per row, in input order.
#[must_use]
pub fn render(rows: &[RecordRow]) -> String {
    rows.iter().map(render_entry).collect::<Vec<_>>().join("\n")
}

/// Render one entry, terminated by a newline.
#[must_use]
pub fn render_entry(row: &RecordRow) -> String {
    let kind = EntryKind::for_document_type(&row.document_type);
    let mut fields: Vec<(&str, String)> = vec![
        ("title", escape(&row.title)),
        ("author", escape(&row.author_list().join(" and "))),
    ];

    if let Some(year) = row.year {
        fields.push(("year", year.to_string()));
    }

    match kind {
        EntryKind::Book => {
            push_opt(&mut fields, "publisher", row.publisher.as_ref());
            push_opt(&mut fields, "isbn", row.isbn.as_ref());
        }
        EntryKind::PhdThesis | EntryKind::MastersThesis => {
            push_opt(&mut fields, "school", row.publisher.as_ref());
        }
        EntryKind::Article => {
            push_opt(&mut fields, "journal", row.journal.as_ref());
            push_opt(&mut fields, "volume", row.volume.as_ref());
            push_opt(&mut fields, "number", row.issue.as_ref());
            push_opt(&mut fields, "pages", row.pages.as_ref());
        }
    }

    if let Some(doi) = non_empty(row.doi.as_ref()) {
        fields.push(("doi", verbatim(doi)));
    }
    fields.push(("url", verbatim(&row.url)));
    fields.push(("abstract", escape(&row.r#abstract)));

    let body = fields
        .iter()
        .map(|(name, value)| format!("  {name} = {{{value}}}"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!("@{}{{{},\n{body}\n}}\n", kind.name(), row.citation_key())
}

fn push_opt(fields: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&String>) {
    if let Some(value) = non_empty(value) {
        fields.push((name, escape(value)));
    }
}

/// Escape LaTeX specials in free text and flatten line breaks.
#[must_use]
pub fn escape(value: &str) -> String {
    let value = collapse_whitespace(value);
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' | '}' | '&' | '%' | '$' | '#' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            _ => out.push(ch),
        }
    }
    out
}

/// Locators stay as-is apart from braces, which would end the field early.
fn verbatim(value: &str) -> String {
    collapse_whitespace(value).replace(['{', '}'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(document_type: &str) -> RecordRow {
        RecordRow {
            id: 3,
            title: "Forecasting with ARIMA".to_string(),
            authors: "George Box, Gwilym Jenkins".to_string(),
            year: Some(1970),
            source: "CrossRef".to_string(),
            url: "https://doi.org/10.1000/x_y".to_string(),
            doi: Some("10.1000/x_y".to_string()),
            document_type: document_type.to_string(),
            journal: Some("J. Forecast".to_string()),
            publisher: Some("Wiley".to_string()),
            isbn: Some("978-0".to_string()),
            volume: Some("4".to_string()),
            issue: Some("2".to_string()),
            pages: Some("1-9".to_string()),
            bibtex_key: Some("Box1970Forecasting".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_entry_kind_mapping() {
        assert_eq!(EntryKind::for_document_type("Book"), EntryKind::Book);
        assert_eq!(EntryKind::for_document_type("Book Chapter"), EntryKind::Book);
        assert_eq!(EntryKind::for_document_type("Dissertation"), EntryKind::PhdThesis);
        assert_eq!(EntryKind::for_document_type("Thesis"), EntryKind::MastersThesis);
        assert_eq!(EntryKind::for_document_type("Undergraduate Thesis"), EntryKind::MastersThesis);
        assert_eq!(EntryKind::for_document_type("Preprint"), EntryKind::Article);
        assert_eq!(EntryKind::for_document_type(""), EntryKind::Article);
    }

    #[test]
    fn test_article_fields() {
        let out = render_entry(&row("Research Article"));
        assert!(out.starts_with("@article{Box1970Forecasting,\n"));
        assert!(out.contains("  author = {George Box and Gwilym Jenkins}"));
        assert!(out.contains("  year = {1970}"));
        assert!(out.contains("  journal = {J. Forecast}"));
        assert!(out.contains("  number = {2}"));
        assert!(out.contains("  doi = {10.1000/x_y}"));
        assert!(out.contains("  url = {https://doi.org/10.1000/x_y}"));
        assert!(out.contains("  abstract = {}"));
        assert!(!out.contains("publisher"));
        assert!(out.ends_with("\n}\n"));
    }

    #[test]
    fn test_book_and_thesis_fields() {
        let book = render_entry(&row("Book"));
        assert!(book.starts_with("@book{"));
        assert!(book.contains("publisher = {Wiley}"));
        assert!(book.contains("isbn = {978-0}"));
        assert!(!book.contains("journal"));

        let thesis = render_entry(&row("Dissertation"));
        assert!(thesis.starts_with("@phdthesis{"));
        assert!(thesis.contains("school = {Wiley}"));
    }

    #[test]
    fn test_missing_year_and_key() {
        let mut r = row("Preprint");
        r.year = None;
        r.bibtex_key = None;
        let out = render_entry(&r);
        assert!(out.starts_with("@article{entry_3,"));
        assert!(!out.contains("year"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("AR & MA: 5% of {x}_t"), "AR \\& MA: 5\\% of \\{x\\}\\_t");
        assert_eq!(escape("line\none"), "line one");
        assert_eq!(escape("a\\b"), "a\\textbackslash{}b");
    }
}
