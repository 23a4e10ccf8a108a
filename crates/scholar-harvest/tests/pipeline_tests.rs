//! Payload-to-record tests across every source.
//!
//! Each test feeds an already fetched payload through the source's
//! extractor and the per-source assembler.

use serde_json::json;

use scholar_harvest::models::{DocumentType, LicenseType, Source};
use scholar_harvest::pipeline::{self, PLACEHOLDER_TITLE};
use scholar_harvest::sources::{archive, arxiv, crossref, ndltd};

const ARXIV_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=all:forecasting</title>
  <entry>
    <id>http://arxiv.org/abs/2101.00001v1</id>
    <published>2021-01-04T12:00:00Z</published>
    <title>Seasonal ARIMA
      forecasting</title>
    <summary>  We study retail demand.  </summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
    <link href="http://arxiv.org/abs/2101.00001v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2101.00001v1" rel="related" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2101.00002v1</id>
    <published>2021-01-05T12:00:00Z</published>
    <summary>Time series forecasting without a title.</summary>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2101.00003v1</id>
    <published>2021-01-06T12:00:00Z</published>
    <title>Graph neural networks</title>
    <summary>Node classification.</summary>
  </entry>
</feed>"#;

fn make_crossref_item(title: &str, licensed: bool) -> serde_json::Value {
    let mut item = json!({
        "title": [title],
        "author": [{"given": "George", "family": "Box"}, {"given": "Nameless"}],
        "published-print": {"date-parts": [[1976, 5]]},
        "published-online": {"date-parts": [[1975]]},
        "DOI": "10.1000/box.1976",
        "container-title": ["Journal of Forecasting"],
        "publisher": "Wiley",
        "page": "1-20",
        "volume": "3",
        "issue": "2",
        "type": "journal-article"
    });
    if licensed {
        item["license"] = json!([{"URL": "https://creativecommons.org/licenses/by/4.0/"}]);
    }
    item
}

// =============================================================================
// arXiv
// =============================================================================

#[test]
fn test_arxiv_feed_to_records() {
    let candidates = arxiv::extract_feed(ARXIV_FEED).unwrap();
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[1].title, PLACEHOLDER_TITLE);

    let records = pipeline::assemble(Source::Arxiv, candidates);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.title, "Seasonal ARIMA forecasting");
    assert_eq!(record.authors, vec!["Ada Lovelace", "Alan Turing"]);
    assert_eq!(record.year, Some(2021));
    assert_eq!(record.url, "http://arxiv.org/abs/2101.00001v1");
    assert_eq!(record.pdf_url.as_deref(), Some("http://arxiv.org/pdf/2101.00001v1"));
    assert_eq!(record.r#abstract, "We study retail demand.");
    assert_eq!(record.license_type, LicenseType::OpenAccess);
    assert_eq!(record.document_type, DocumentType::Preprint);
    assert!((record.relevance_score - 0.5).abs() < 1e-9);
    assert_eq!(record.bibtex_key, "Lovelace2021Seasonal");
}

#[test]
fn test_arxiv_empty_feed() {
    let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>Nothing</title></feed>"#;
    assert!(arxiv::extract_feed(xml).unwrap().is_empty());
}

#[test]
fn test_arxiv_not_a_feed() {
    assert!(arxiv::extract_feed("<html><body>Service unavailable</body></html>").is_err());
}

// =============================================================================
// CrossRef
// =============================================================================

#[test]
fn test_crossref_payload_to_records() {
    let payload = json!({
        "status": "ok",
        "message": {
            "total-results": 4,
            "items": [
                make_crossref_item("Time  series forecasting", true),
                make_crossref_item("Time series forecasting, unlicensed", false),
                {"license": [{}], "DOI": "10.1000/untitled"},
                {"title": ["Time series"], "author": "not a list", "license": [{}]}
            ]
        }
    });

    let candidates = crossref::extract(&payload).unwrap();
    assert_eq!(candidates.len(), 3, "the malformed item is skipped");

    let records = pipeline::assemble(Source::Crossref, candidates);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.title, "Time series forecasting");
    assert_eq!(record.authors, vec!["George Box"]);
    assert_eq!(record.year, Some(1976));
    assert_eq!(record.url, "https://doi.org/10.1000/box.1976");
    assert_eq!(record.doi.as_deref(), Some("10.1000/box.1976"));
    assert_eq!(record.journal.as_deref(), Some("Journal of Forecasting"));
    assert_eq!(record.publisher.as_deref(), Some("Wiley"));
    assert_eq!(record.pages.as_deref(), Some("1-20"));
    assert_eq!(record.volume.as_deref(), Some("3"));
    assert_eq!(record.issue.as_deref(), Some("2"));
    assert_eq!(record.license_type, LicenseType::OpenAccess);
    assert_eq!(record.document_type, DocumentType::ResearchArticle);
    assert_eq!(record.bibtex_key, "Box1976Time");
}

#[test]
fn test_crossref_online_year_fallback() {
    let mut item = make_crossref_item("Time series forecasting", true);
    item.as_object_mut().unwrap().remove("published-print");
    let payload = json!({"message": {"items": [item]}});

    let records = pipeline::assemble(Source::Crossref, crossref::extract(&payload).unwrap());
    assert_eq!(records[0].year, Some(1975));
    assert_eq!(records[0].bibtex_key, "Box1975Time");
}

#[test]
fn test_crossref_missing_items_is_malformed() {
    assert!(crossref::extract(&json!({"message": {}})).is_err());
    assert!(crossref::extract(&json!({"message": {"items": "none"}})).is_err());
    assert!(crossref::extract(&json!([])).is_err());
}

// =============================================================================
// Internet Archive
// =============================================================================

#[test]
fn test_archive_payload_to_records() {
    let payload = json!({
        "responseHeader": {"status": 0},
        "response": {
            "numFound": 2,
            "docs": [
                {
                    "identifier": "timeseriesfore00box",
                    "title": "Time series forecasting and control",
                    "creator": ["Box, George", "Jenkins, Gwilym"],
                    "year": "1970",
                    "description": ["Part one.", "Part two."]
                },
                {
                    "identifier": "tsa00",
                    "title": "Time series analysis",
                    "creator": "Anon",
                    "year": 1980
                }
            ]
        }
    });

    let records = pipeline::assemble(Source::InternetArchive, archive::extract(&payload).unwrap());
    assert_eq!(records.len(), 1, "0.3 is not above the archive threshold");

    let record = &records[0];
    assert_eq!(record.authors, vec!["Box, George", "Jenkins, Gwilym"]);
    assert_eq!(record.year, Some(1970));
    assert_eq!(record.r#abstract, "Part one. Part two.");
    assert_eq!(record.url, "https://archive.org/details/timeseriesfore00box");
    assert_eq!(
        record.pdf_url.as_deref(),
        Some("https://archive.org/download/timeseriesfore00box/timeseriesfore00box.pdf")
    );
    assert_eq!(record.license_type, LicenseType::PublicDomain);
    assert_eq!(record.document_type, DocumentType::Book);
    assert_eq!(record.bibtex_key, "George1970Time");
}

// =============================================================================
// NDLTD
// =============================================================================

#[test]
fn test_ndltd_degrees() {
    let payload = json!({
        "response": {
            "docs": [
                {
                    "title": ["Time series forecasting of rainfall"],
                    "author": "Jane Roe",
                    "year": ["2015"],
                    "degree": "Ph.D.",
                    "publisher": ["MIT"],
                    "url": "https://example.edu/etd/1"
                },
                {"title": "Time series forecasting", "author": ["Sam Poe"], "degree": ["M.S."]},
                {"title": "Time series forecasting", "author": "Kim Loe", "degree": "B.A."},
                {"title": "Graph theory", "author": "Lee Doe", "degree": "Ph.D."}
            ]
        }
    });

    let records = ndltd::records_from_payload(&payload).unwrap();
    let types: Vec<DocumentType> = records.iter().map(|r| r.document_type).collect();
    assert_eq!(
        types,
        vec![DocumentType::Dissertation, DocumentType::Thesis, DocumentType::UndergraduateThesis]
    );

    assert_eq!(records[0].year, Some(2015));
    assert_eq!(records[0].publisher.as_deref(), Some("MIT"));
    assert_eq!(records[0].url, "https://example.edu/etd/1");
    assert!(records.iter().all(|r| r.license_type == LicenseType::OpenAccess));
}

// =============================================================================
// Cross-cutting invariants
// =============================================================================

#[test]
fn test_assembled_records_keep_input_order() {
    let payload = json!({
        "message": {
            "items": [
                make_crossref_item("Trend correlation study", true),
                make_crossref_item("Time series forecasting", true),
                make_crossref_item("ARIMA and GARCH", true)
            ]
        }
    });

    let titles: Vec<String> = pipeline::assemble(Source::Crossref, crossref::extract(&payload).unwrap())
        .into_iter()
        .map(|r| r.title)
        .collect();
    assert_eq!(titles, vec!["Trend correlation study", "Time series forecasting", "ARIMA and GARCH"]);
}

#[test]
fn test_no_record_has_blank_title() {
    let payload = json!({
        "response": {"docs": [{"title": "   ", "description": "time series forecasting arima"}]}
    });
    assert!(pipeline::assemble(Source::InternetArchive, archive::extract(&payload).unwrap()).is_empty());
}
