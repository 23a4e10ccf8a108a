//! Export engine tests.
//!
//! BibTeX output is checked by parsing it back with `biblatex`; the CSV
//! formats are read back with `csv`.

use biblatex::{Bibliography, ChunksExt, Entry, EntryType};

use scholar_harvest::export::{self, bibtex, ris, tabular, zotero};
use scholar_harvest::models::{ExportFormat, RecordRow};

fn make_row(id: i64, document_type: &str) -> RecordRow {
    RecordRow {
        id,
        title: "Time Series Analysis: Forecasting & Control".to_string(),
        authors: "George Box, Gwilym Jenkins".to_string(),
        year: Some(1970),
        source: "CrossRef".to_string(),
        url: "https://doi.org/10.1000/tsa_1970".to_string(),
        doi: Some("10.1000/tsa_1970".to_string()),
        r#abstract: "A 100% classic on ARIMA\nmodels.".to_string(),
        license_type: "Open Access".to_string(),
        relevance_score: 0.7,
        document_type: document_type.to_string(),
        journal: Some("Journal of Forecasting".to_string()),
        publisher: Some("Holden-Day".to_string()),
        pages: Some("1-575".to_string()),
        volume: Some("1".to_string()),
        issue: Some(String::new()),
        isbn: Some("978-0-8162-1104-3".to_string()),
        bibtex_key: Some(format!("Box1970Time{id}")),
        date_added: Some("2024-03-01 10:00:00".to_string()),
        ..Default::default()
    }
}

fn make_rows() -> Vec<RecordRow> {
    vec![
        make_row(1, "Book"),
        make_row(2, "Dissertation"),
        make_row(3, "Thesis"),
        make_row(4, "Research Article"),
        make_row(5, "Conference Paper"),
    ]
}

// =============================================================================
// BibTeX
// =============================================================================

#[test]
fn test_bibtex_parses_back() {
    let rows = make_rows();
    let output = bibtex::render(&rows);

    let bib = Bibliography::parse(&output).unwrap();
    assert_eq!(bib.len(), rows.len());

    let expected = [
        ("Box1970Time1", EntryType::Book),
        ("Box1970Time2", EntryType::PhdThesis),
        ("Box1970Time3", EntryType::MastersThesis),
        ("Box1970Time4", EntryType::Article),
        ("Box1970Time5", EntryType::Article),
    ];
    for (key, entry_type) in expected {
        let entry = bib.get(key).unwrap_or_else(|| panic!("missing entry {key}"));
        assert_eq!(entry.entry_type, entry_type, "{key}");
        assert!(entry.get("title").is_some(), "{key}");
        assert!(entry.get("author").is_some(), "{key}");
        assert!(entry.get("url").is_some(), "{key}");
        assert!(entry.get("doi").is_some(), "{key}");
    }
}

fn parsed_authors(entry: &Entry) -> Vec<String> {
    entry
        .author()
        .unwrap()
        .iter()
        .map(|p| format!("{} {}", p.given_name, p.name))
        .collect()
}

#[test]
fn test_bibtex_recovers_values_with_latex_specials() {
    let titles = [
        "Forecasting & Control",
        "A 5% {bias} in x_t and $y$ #1",
        "Tilde ~ and caret ^ and back\\slash",
    ];
    let kinds = [
        ("Book", EntryType::Book),
        ("Dissertation", EntryType::PhdThesis),
        ("Thesis", EntryType::MastersThesis),
        ("Research Article", EntryType::Article),
    ];

    let mut rows = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        for (j, (document_type, _)) in kinds.iter().enumerate() {
            let id = i64::try_from(i * kinds.len() + j).unwrap();
            rows.push(RecordRow {
                title: (*title).to_string(),
                year: Some(1999),
                bibtex_key: None,
                ..make_row(id, document_type)
            });
        }
    }

    let bib = Bibliography::parse(&bibtex::render(&rows)).unwrap();
    assert_eq!(bib.len(), rows.len());

    for (row, (_, entry_type)) in rows.iter().zip(kinds.iter().cycle()) {
        let key = row.citation_key();
        let entry = bib.get(&key).unwrap_or_else(|| panic!("missing entry {key}"));

        assert_eq!(entry.entry_type, *entry_type, "{key}");
        assert_eq!(entry.title().unwrap().format_verbatim(), row.title, "{key}");
        assert_eq!(parsed_authors(entry), vec!["George Box", "Gwilym Jenkins"], "{key}");
        assert_eq!(entry.get("year").unwrap().format_verbatim(), "1999", "{key}");
    }
}

#[test]
fn test_bibtex_fields_follow_entry_type() {
    let output = bibtex::render(&make_rows());
    let entries: Vec<&str> = output.split("\n@").collect();
    assert_eq!(entries.len(), 5);

    // Book: publisher and isbn, no journal.
    assert!(entries[0].contains("publisher = {Holden-Day}"));
    assert!(entries[0].contains("isbn = {978-0-8162-1104-3}"));
    assert!(!entries[0].contains("journal ="));

    // Theses: the publisher becomes the school.
    assert!(entries[1].contains("school = {Holden-Day}"));
    assert!(entries[2].contains("school = {Holden-Day}"));
    assert!(!entries[1].contains("isbn ="));

    // Article: journal, volume, pages; the empty issue is dropped.
    assert!(entries[3].contains("journal = {Journal of Forecasting}"));
    assert!(entries[3].contains("volume = {1}"));
    assert!(entries[3].contains("pages = {1-575}"));
    assert!(!entries[3].contains("number ="));
    assert!(!entries[3].contains("publisher ="));
}

#[test]
fn test_bibtex_escapes_free_text_only() {
    let output = bibtex::render_entry(&make_row(1, "Research Article"));
    assert!(output.contains("title = {Time Series Analysis: Forecasting \\& Control}"));
    assert!(output.contains("abstract = {A 100\\% classic on ARIMA models.}"));
    assert!(output.contains("author = {George Box and Gwilym Jenkins}"));
    assert!(output.contains("doi = {10.1000/tsa_1970}"));
    assert!(output.contains("url = {https://doi.org/10.1000/tsa_1970}"));
}

#[test]
fn test_bibtex_missing_key_and_year() {
    let row = RecordRow { bibtex_key: None, year: None, ..make_row(42, "Preprint") };
    let output = bibtex::render_entry(&row);
    assert!(output.starts_with("@article{entry_42,\n"));
    assert!(!output.contains("year ="));
    assert!(Bibliography::parse(&output).unwrap().get("entry_42").is_some());
}

// =============================================================================
// RIS
// =============================================================================

#[test]
fn test_ris_record_layout() {
    let output = ris::render(&make_rows()[3..4]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "TY  - JOUR");
    assert_eq!(lines[1], "TI  - Time Series Analysis: Forecasting & Control");
    assert_eq!(lines[2], "PY  - 1970");
    assert_eq!(lines[3], "UR  - https://doi.org/10.1000/tsa_1970");
    assert_eq!(lines[4], "AB  - A 100% classic on ARIMA models.");
    assert_eq!(lines[5], "AU  - George Box");
    assert_eq!(lines[6], "AU  - Gwilym Jenkins");
    assert!(lines.contains(&"JO  - Journal of Forecasting"));
    assert!(lines.contains(&"DO  - 10.1000/tsa_1970"));
    assert!(!lines.iter().any(|l| l.starts_with("IS  -")));
    assert!(output.ends_with("ER  - \n\n"));
}

#[test]
fn test_ris_type_codes_per_row() {
    let output = ris::render(&make_rows());
    let types: Vec<&str> = output.lines().filter(|l| l.starts_with("TY  - ")).collect();
    assert_eq!(
        types,
        vec!["TY  - BOOK", "TY  - THES", "TY  - THES", "TY  - JOUR", "TY  - CONF"]
    );
}

#[test]
fn test_ris_optional_lines_omitted_required_lines_kept() {
    let row = RecordRow {
        id: 7,
        title: "Bare".to_string(),
        authors: String::new(),
        document_type: "Preprint".to_string(),
        ..Default::default()
    };
    let output = ris::render(&[row]);
    assert_eq!(output, "TY  - JOUR\nTI  - Bare\nUR  - \nAB  - \nER  - \n\n");
}

#[test]
fn test_ris_no_blank_lines_inside_records() {
    let output = ris::render(&make_rows());
    for record in output.split("ER  - \n\n").filter(|r| !r.is_empty()) {
        assert!(!record.contains("\n\n"), "blank line inside record: {record:?}");
    }
}

// =============================================================================
// Zotero CSV
// =============================================================================

#[test]
fn test_zotero_csv_reads_back() {
    let output = zotero::render(&make_rows()).unwrap();
    let mut reader = csv::Reader::from_reader(output.as_bytes());

    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, zotero::COLUMNS.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 5);

    let item_types: Vec<&str> = records.iter().map(|r| &r[0]).collect();
    assert_eq!(item_types, vec!["book", "thesis", "thesis", "journalArticle", "conferencePaper"]);

    let first = &records[0];
    assert_eq!(&first[1], "Time Series Analysis: Forecasting & Control");
    assert_eq!(&first[2], "George Box, Gwilym Jenkins");
    assert_eq!(&first[3], "1970");
    assert_eq!(&first[5], "A 100% classic on ARIMA\nmodels.");
    assert_eq!(&first[10], "");
    assert_eq!(&first[13], "2024-03-01 10:00:00");
    assert_eq!(&first[14], zotero::MANUAL_TAGS);
}

#[test]
fn test_zotero_item_type_is_exact_label_match() {
    assert_eq!(zotero::item_type("Undergraduate Thesis"), "journalArticle");
    assert_eq!(zotero::item_type("book"), "journalArticle");
    assert_eq!(zotero::item_type("Book Chapter"), "bookSection");
    assert_eq!(zotero::item_type("Technical Report"), "report");
}

// =============================================================================
// Pass-through formats
// =============================================================================

#[test]
fn test_csv_dump_columns() {
    let output = tabular::render_csv(&make_rows()[..1]).unwrap();
    let mut reader = csv::Reader::from_reader(output.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, tabular::COLUMNS.to_vec());

    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[0], "1");
    assert_eq!(&record[3], "1970");
    assert_eq!(&record[18], "Box1970Time1");
}

#[test]
fn test_csv_dump_of_nothing_has_header() {
    let output = tabular::render_csv(&[]).unwrap();
    assert_eq!(output.trim_end(), tabular::COLUMNS.join(","));
}

#[test]
fn test_json_dump_parses_back() {
    let rows = make_rows();
    let output = tabular::render_json(&rows).unwrap();
    let decoded: Vec<RecordRow> = serde_json::from_str(&output).unwrap();
    assert_eq!(decoded, rows);
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_export_preserves_row_order() {
    let mut rows = make_rows();
    rows.reverse();
    let snapshot = rows.clone();

    let output = export::export(&rows, ExportFormat::Bibtex).unwrap();
    let first = output.find("Box1970Time5").unwrap();
    let last = output.find("Box1970Time1").unwrap();
    assert!(first < last);
    assert_eq!(rows, snapshot);
}

#[test]
fn test_export_is_deterministic() {
    let rows = make_rows();
    for format in [
        ExportFormat::Bibtex,
        ExportFormat::Ris,
        ExportFormat::Zotero,
        ExportFormat::Csv,
        ExportFormat::Json,
    ] {
        let a = export::export(&rows, format).unwrap();
        let b = export::export(&rows, format).unwrap();
        assert_eq!(a, b, "{format:?}");
    }
}

#[test]
fn test_empty_exports() {
    assert_eq!(export::export(&[], ExportFormat::Bibtex).unwrap(), "");
    assert_eq!(export::export(&[], ExportFormat::Ris).unwrap(), "");
    assert_eq!(export::export(&[], ExportFormat::Json).unwrap(), "[]");
    let zotero = export::export(&[], ExportFormat::Zotero).unwrap();
    assert_eq!(zotero.lines().count(), 1);
}
