//! Document type classification from weak textual signals.

use crate::models::{DocumentType, Source};

const THESIS_MARKERS: &[&str] = &["thesis", "dissertation", "phd", "master", "doctoral", "graduate"];
const DOCTORAL_MARKERS: &[&str] = &["phd", "doctoral", "doctor"];
const BOOK_MARKERS: &[&str] =
    &["handbook", "textbook", "manual", "guide", "introduction to", "principles of"];

const DEGREE_DOCTORAL: &[&str] = &["phd", "doctoral", "doctor", "ph.d"];
const DEGREE_MASTER: &[&str] = &["master", "ms", "m.s", "ma", "m.a"];
const DEGREE_BACHELOR: &[&str] = &["bachelor", "bs", "b.s", "ba", "b.a"];

/// Classify a work.
///
/// Rules, first match wins:
/// 1. thesis vocabulary (doctoral vocabulary makes it a dissertation)
/// 2. Internet Archive items and book vocabulary
/// 3. the source-native type code, when one is supplied
/// 4. arXiv items are preprints
/// 5. research article
#[must_use]
pub fn classify(
    title: &str,
    abstract_text: &str,
    source: Source,
    native_type: Option<&str>,
) -> DocumentType {
    let text = format!("{title} {abstract_text}").to_lowercase();

    if contains_any(&text, THESIS_MARKERS) {
        return if contains_any(&text, DOCTORAL_MARKERS) {
            DocumentType::Dissertation
        } else {
            DocumentType::Thesis
        };
    }

    if source == Source::InternetArchive || contains_any(&text, BOOK_MARKERS) {
        return DocumentType::Book;
    }

    if let Some(code) = native_type.map(str::trim).filter(|c| !c.is_empty()) {
        return from_crossref_type(code);
    }

    if source == Source::Arxiv {
        return DocumentType::Preprint;
    }

    DocumentType::ResearchArticle
}

/// Map a CrossRef `type` code. Unknown codes are research articles.
#[must_use]
pub fn from_crossref_type(code: &str) -> DocumentType {
    match code {
        "journal-article" => DocumentType::ResearchArticle,
        "book" => DocumentType::Book,
        "book-chapter" => DocumentType::BookChapter,
        "proceedings-article" => DocumentType::ConferencePaper,
        "dissertation" => DocumentType::Dissertation,
        "report" => DocumentType::TechnicalReport,
        _ => DocumentType::ResearchArticle,
    }
}

/// Classify a thesis-granularity item by its degree string.
///
/// The degree is searched together with the title and abstract, as
/// substrings, doctoral first, then master, then bachelor.
#[must_use]
pub fn classify_thesis(title: &str, abstract_text: &str, degree: &str) -> DocumentType {
    let text = format!("{title} {abstract_text} {degree}").to_lowercase();

    if contains_any(&text, DEGREE_DOCTORAL) {
        DocumentType::Dissertation
    } else if contains_any(&text, DEGREE_MASTER) {
        DocumentType::Thesis
    } else if contains_any(&text, DEGREE_BACHELOR) {
        DocumentType::UndergraduateThesis
    } else {
        DocumentType::Thesis
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}
