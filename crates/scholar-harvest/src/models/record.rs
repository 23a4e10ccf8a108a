//! Unified record model shared by every source.

use serde::{Deserialize, Serialize};

use super::{DocumentType, LicenseType, Source};

/// Author text stored and exported when a record has no authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Fields pulled out of one source item before scoring and gating.
///
/// Produced by the per-source extractors; consumed by
/// [`crate::pipeline::assemble`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    /// Whitespace-collapsed title (may be empty, the gate drops those).
    pub title: String,
    /// Author display names in source order.
    pub authors: Vec<String>,
    /// Publication year.
    pub year: Option<i32>,
    /// Abstract or description text.
    pub r#abstract: String,
    /// Canonical landing page.
    pub url: String,
    /// Digital Object Identifier.
    pub doi: Option<String>,
    /// Direct PDF link.
    pub pdf_url: Option<String>,
    /// Container title.
    pub journal: Option<String>,
    /// Publisher, or granting university for theses.
    pub publisher: Option<String>,
    /// Page range.
    pub pages: Option<String>,
    /// Volume.
    pub volume: Option<String>,
    /// Issue.
    pub issue: Option<String>,
    /// ISBN.
    pub isbn: Option<String>,
    /// Source-native type code (CrossRef `type`).
    pub native_type: Option<String>,
    /// Degree string for thesis-granularity sources.
    pub degree: Option<String>,
    /// Number of license entries the item declares.
    pub license_count: usize,
}

/// A normalized academic work, the shape every source converges to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRecord {
    /// Non-empty, whitespace-collapsed title.
    pub title: String,

    /// Author names in source order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Four-digit publication year.
    #[serde(default)]
    pub year: Option<i32>,

    /// Source the record was harvested from.
    pub source: Source,

    /// Canonical locator.
    pub url: String,

    /// Digital Object Identifier.
    #[serde(default)]
    pub doi: Option<String>,

    /// Abstract text (may be empty).
    #[serde(default)]
    pub r#abstract: String,

    /// Direct PDF link.
    #[serde(default)]
    pub pdf_url: Option<String>,

    /// Licensing status.
    pub license_type: LicenseType,

    /// Topical relevance in `[0, 1]`.
    pub relevance_score: f64,

    /// Classified document type.
    pub document_type: DocumentType,

    /// Journal or container title.
    #[serde(default)]
    pub journal: Option<String>,

    /// Publisher or granting institution.
    #[serde(default)]
    pub publisher: Option<String>,

    /// Page range.
    #[serde(default)]
    pub pages: Option<String>,

    /// Volume.
    #[serde(default)]
    pub volume: Option<String>,

    /// Issue.
    #[serde(default)]
    pub issue: Option<String>,

    /// ISBN.
    #[serde(default)]
    pub isbn: Option<String>,

    /// Citation key (not guaranteed unique).
    pub bibtex_key: String,
}

impl UnifiedRecord {
    /// First author, or "Unknown".
    #[must_use]
    pub fn first_author(&self) -> &str {
        self.authors.first().map_or(UNKNOWN_AUTHOR, String::as_str)
    }

    /// Authors joined with ", ", or "Unknown" when there are none.
    #[must_use]
    pub fn author_names(&self) -> String {
        if self.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.authors.join(", ")
        }
    }

    /// Persistence identity: two records with equal keys are duplicates.
    #[must_use]
    pub fn dedup_key(&self) -> (&str, Source) {
        (&self.title, self.source)
    }
}

/// One row of a stored result set, the input to every exporter.
///
/// Mirrors the store's `books` table: authors are a single joined string
/// and the enumerated columns are kept as their stored labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    /// Store row id.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Authors joined with ", ".
    pub authors: String,
    /// Publication year.
    pub year: Option<i32>,
    /// Source label.
    pub source: String,
    /// Canonical locator.
    pub url: String,
    /// Digital Object Identifier.
    pub doi: Option<String>,
    /// Abstract text.
    pub r#abstract: String,
    /// Direct PDF link.
    pub pdf_url: Option<String>,
    /// License label.
    pub license_type: String,
    /// Relevance score.
    pub relevance_score: f64,
    /// Document type label.
    pub document_type: String,
    /// Journal or container title.
    pub journal: Option<String>,
    /// Publisher or granting institution.
    pub publisher: Option<String>,
    /// Page range.
    pub pages: Option<String>,
    /// Volume.
    pub volume: Option<String>,
    /// Issue.
    pub issue: Option<String>,
    /// ISBN.
    pub isbn: Option<String>,
    /// Citation key as stored.
    pub bibtex_key: Option<String>,
    /// Insertion timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub date_added: Option<String>,
}

impl RecordRow {
    /// Build the row a record would occupy under the given id.
    #[must_use]
    pub fn from_record(id: i64, record: &UnifiedRecord) -> Self {
        Self {
            id,
            title: record.title.clone(),
            authors: record.author_names(),
            year: record.year,
            source: record.source.label().to_string(),
            url: record.url.clone(),
            doi: record.doi.clone(),
            r#abstract: record.r#abstract.clone(),
            pdf_url: record.pdf_url.clone(),
            license_type: record.license_type.label().to_string(),
            relevance_score: record.relevance_score,
            document_type: record.document_type.label().to_string(),
            journal: record.journal.clone(),
            publisher: record.publisher.clone(),
            pages: record.pages.clone(),
            volume: record.volume.clone(),
            issue: record.issue.clone(),
            isbn: record.isbn.clone(),
            bibtex_key: Some(record.bibtex_key.clone()),
            date_added: None,
        }
    }

    /// Citation key to export under: the stored key, or `entry_<id>`.
    #[must_use]
    pub fn citation_key(&self) -> String {
        match non_empty(self.bibtex_key.as_ref()) {
            Some(key) => key.to_string(),
            None => format!("entry_{}", self.id),
        }
    }

    /// Individual author names split back out of the joined column.
    #[must_use]
    pub fn author_list(&self) -> Vec<&str> {
        self.authors.split(", ").map(str::trim).filter(|a| !a.is_empty()).collect()
    }
}

/// Treat empty strings in optional columns as absent.
#[must_use]
pub fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}
