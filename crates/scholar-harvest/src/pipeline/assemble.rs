//! Per-source record assembly: score, classify, gate, key.

use super::{citation_key, classify, relevance};
use crate::models::{Candidate, DocumentType, LicenseType, Source, UnifiedRecord};

/// Title extractors substitute when a feed entry has none.
pub const PLACEHOLDER_TITLE: &str = "No title";

/// Per-source acceptance rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceptanceGate {
    /// Relevance must be strictly greater than this.
    pub min_relevance: f64,
    /// The item must declare at least one license.
    pub requires_license: bool,
}

impl AcceptanceGate {
    /// Rules for a source.
    #[must_use]
    pub const fn for_source(source: Source) -> Self {
        match source {
            Source::Arxiv => Self { min_relevance: 0.1, requires_license: false },
            Source::Crossref => Self { min_relevance: 0.1, requires_license: true },
            Source::InternetArchive | Source::Ndltd => {
                Self { min_relevance: 0.3, requires_license: false }
            }
        }
    }

    /// Whether a scored candidate passes.
    #[must_use]
    pub fn accepts(&self, candidate: &Candidate, relevance: f64) -> bool {
        let title = candidate.title.trim();
        if title.is_empty() || title == PLACEHOLDER_TITLE {
            return false;
        }
        if self.requires_license && candidate.license_count == 0 {
            return false;
        }
        relevance > self.min_relevance
    }
}

/// Document type for a candidate, using the degree-based rules for NDLTD.
#[must_use]
pub fn document_type(source: Source, candidate: &Candidate) -> DocumentType {
    match source {
        Source::Ndltd => classify::classify_thesis(
            &candidate.title,
            &candidate.r#abstract,
            candidate.degree.as_deref().unwrap_or_default(),
        ),
        _ => classify::classify(
            &candidate.title,
            &candidate.r#abstract,
            source,
            candidate.native_type.as_deref(),
        ),
    }
}

/// Turn one candidate into a record, or `None` when the gate rejects it.
#[must_use]
pub fn assemble_one(source: Source, candidate: Candidate) -> Option<UnifiedRecord> {
    let relevance_score = relevance::score(&candidate.title, &candidate.r#abstract);
    let document_type = document_type(source, &candidate);

    if !AcceptanceGate::for_source(source).accepts(&candidate, relevance_score) {
        tracing::debug!(
            source = %source,
            title = %candidate.title,
            relevance = relevance_score,
            "Candidate rejected by acceptance gate"
        );
        return None;
    }

    let license_type = match source {
        Source::Crossref => LicenseType::for_crossref(candidate.license_count),
        other => other.default_license(),
    };

    let mut record = UnifiedRecord {
        title: candidate.title,
        authors: candidate.authors,
        year: candidate.year,
        source,
        url: candidate.url,
        doi: candidate.doi,
        r#abstract: candidate.r#abstract,
        pdf_url: candidate.pdf_url,
        license_type,
        relevance_score,
        document_type,
        journal: candidate.journal,
        publisher: candidate.publisher,
        pages: candidate.pages,
        volume: candidate.volume,
        issue: candidate.issue,
        isbn: candidate.isbn,
        bibtex_key: String::new(),
    };
    record.bibtex_key = citation_key::generate_key(record.first_author(), record.year, &record.title);
    Some(record)
}

/// Assemble every accepted candidate from one source pass, in input order.
#[must_use]
pub fn assemble(source: Source, candidates: Vec<Candidate>) -> Vec<UnifiedRecord> {
    let total = candidates.len();
    let records: Vec<UnifiedRecord> =
        candidates.into_iter().filter_map(|c| assemble_one(source, c)).collect();

    tracing::info!(
        source = %source,
        candidates = total,
        accepted = records.len(),
        "Assembled records"
    );

    records
}
