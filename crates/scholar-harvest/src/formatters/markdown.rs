//! Markdown output formatting.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::models::{RecordRow, non_empty};

/// Abstracts longer than this many characters are cut in listings.
pub const ABSTRACT_PREVIEW_CHARS: usize = 500;

/// Format a list of records as Markdown.
#[must_use]
pub fn format_records_markdown(rows: &[RecordRow]) -> String {
    if rows.is_empty() {
        return "No records found.".to_string();
    }

    let mut output = format!("# Records ({} results)\n\n", rows.len());

    for (i, row) in rows.iter().enumerate() {
        output.push_str(&format_record_markdown(row, i + 1));
        output.push_str("\n---\n\n");
    }

    output
}

/// Format a single record as Markdown.
#[must_use]
pub fn format_record_markdown(row: &RecordRow, index: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("## {}. {}\n\n", index, row.title));
    output.push_str(&format!("**Authors**: {}\n\n", row.authors));

    let mut meta = Vec::new();
    meta.push(format!("**Year**: {}", row.year.map_or_else(|| "Unknown".to_string(), |y| y.to_string())));
    meta.push(format!("**Source**: {}", row.source));
    meta.push(format!("**Type**: {}", row.document_type));
    meta.push(format!("**Relevance**: {:.2}", row.relevance_score));
    output.push_str(&format!("{}\n\n", meta.join(" | ")));

    if let Some(journal) = non_empty(row.journal.as_ref()) {
        output.push_str(&format!("**Journal**: {journal}\n\n"));
    }
    if let Some(publisher) = non_empty(row.publisher.as_ref()) {
        output.push_str(&format!("**Publisher**: {publisher}\n\n"));
    }

    let mut links = Vec::new();
    if !row.url.is_empty() {
        links.push(format!("[View]({})", row.url));
    }
    if let Some(pdf_url) = non_empty(row.pdf_url.as_ref()) {
        links.push(format!("[PDF]({pdf_url})"));
    }
    if let Some(doi) = non_empty(row.doi.as_ref()) {
        links.push(format!("[DOI](https://doi.org/{doi})"));
    }
    if !links.is_empty() {
        output.push_str(&format!("**Links**: {}\n\n", links.join(" | ")));
    }

    if !row.license_type.is_empty() {
        output.push_str(&format!("**License**: {}\n\n", row.license_type));
    }

    if !row.r#abstract.is_empty() {
        output.push_str(&format!("**Abstract**: {}\n", truncate(&row.r#abstract, ABSTRACT_PREVIEW_CHARS)));
    }

    output
}

/// Cut `text` to at most `max_chars` characters, marking the cut with "...".
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => Cow::Owned(format!("{}...", &text[..byte_index])),
        None => Cow::Borrowed(text),
    }
}

/// Aggregate statistics over a result set.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    /// Number of rows.
    pub total: usize,
    /// Mean year over rows that have one.
    pub mean_year: Option<f64>,
    /// Most frequent document type (ties go to the alphabetically first).
    pub most_common_type: Option<String>,
    /// Mean relevance score.
    pub mean_relevance: Option<f64>,
    /// Document type counts, most frequent first.
    pub type_distribution: Vec<(String, usize)>,
}

impl ResultSummary {
    /// Compute the summary of `rows`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_rows(rows: &[RecordRow]) -> Self {
        let years: Vec<i32> = rows.iter().filter_map(|r| r.year).collect();
        let mean_year = (!years.is_empty())
            .then(|| years.iter().map(|&y| f64::from(y)).sum::<f64>() / years.len() as f64);

        let mean_relevance = (!rows.is_empty())
            .then(|| rows.iter().map(|r| r.relevance_score).sum::<f64>() / rows.len() as f64);

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for row in rows {
            *counts.entry(row.document_type.as_str()).or_default() += 1;
        }
        let mut type_distribution: Vec<(String, usize)> =
            counts.into_iter().map(|(label, n)| (label.to_string(), n)).collect();
        // Stable sort keeps alphabetical order among equal counts.
        type_distribution.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            total: rows.len(),
            mean_year,
            most_common_type: type_distribution.first().map(|(label, _)| label.clone()),
            mean_relevance,
            type_distribution,
        }
    }
}

/// Format a summary as Markdown.
#[must_use]
pub fn format_summary_markdown(summary: &ResultSummary) -> String {
    let mut output = String::from("# Summary\n\n");

    output.push_str(&format!("- **Total**: {}\n", summary.total));
    if let Some(year) = summary.mean_year {
        output.push_str(&format!("- **Average year**: {year:.0}\n"));
    }
    if let Some(kind) = &summary.most_common_type {
        output.push_str(&format!("- **Most common type**: {kind}\n"));
    }
    if let Some(relevance) = summary.mean_relevance {
        output.push_str(&format!("- **Average relevance**: {relevance:.2}\n"));
    }

    if !summary.type_distribution.is_empty() {
        output.push_str("\n| Document type | Count |\n|---|---|\n");
        for (label, count) in &summary.type_distribution {
            output.push_str(&format!("| {label} | {count} |\n"));
        }
    }

    output
}
