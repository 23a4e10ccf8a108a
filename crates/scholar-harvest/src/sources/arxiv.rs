//! arXiv Atom feed adapter.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{MetadataSource, finish};
use crate::client::{HarvestClient, params};
use crate::config::api;
use crate::error::{ClientResult, NormalizeError, NormalizeResult};
use crate::models::field::{collapse_whitespace, parse_year_str};
use crate::models::{Candidate, Source, UnifiedRecord};
use crate::pipeline::PLACEHOLDER_TITLE;

const PDF_MIME: &str = "application/pdf";

/// One `<entry>` of an arXiv Atom feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArxivEntry {
    /// `<id>`: the abstract page URL.
    pub id: String,
    /// `<title>`, `None` when the element is absent.
    pub title: Option<String>,
    /// `<summary>`.
    pub summary: String,
    /// `<published>` timestamp.
    pub published: String,
    /// `<author><name>` values in order.
    pub authors: Vec<String>,
    /// First link with `type="application/pdf"`.
    pub pdf_url: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Summary,
    Published,
    AuthorName,
}

/// Parse an Atom feed into its entries.
///
/// # Errors
///
/// Returns an error when the text is not well-formed XML or has no
/// `<feed>` root.
pub fn parse_feed(xml: &str) -> NormalizeResult<Vec<ArxivEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<ArxivEntry> = None;
    let mut field: Option<Field> = None;
    let mut in_author = false;
    let mut saw_feed = false;
    let mut buffer = Vec::new();

    loop {
        match reader.read_event_into(&mut buffer)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"feed" => saw_feed = true,
                b"entry" => current = Some(ArxivEntry::default()),
                b"author" if current.is_some() => in_author = true,
                b"link" => {
                    if let Some(entry) = current.as_mut() {
                        take_pdf_link(entry, e);
                    }
                }
                name if current.is_some() => {
                    field = match name {
                        b"id" => Some(Field::Id),
                        b"title" => Some(Field::Title),
                        b"summary" => Some(Field::Summary),
                        b"published" => Some(Field::Published),
                        b"name" if in_author => Some(Field::AuthorName),
                        _ => None,
                    };
                    if field == Some(Field::Title) {
                        if let Some(entry) = current.as_mut() {
                            entry.title.get_or_insert_with(String::new);
                        }
                    }
                }
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"link" => {
                    if let Some(entry) = current.as_mut() {
                        take_pdf_link(entry, e);
                    }
                }
                b"title" => {
                    if let Some(entry) = current.as_mut() {
                        entry.title.get_or_insert_with(String::new);
                    }
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = e.unescape()?;
                    push_text(entry, f, &text);
                }
            }
            Event::CData(e) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    push_text(entry, f, &text);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"entry" => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                    field = None;
                    in_author = false;
                }
                b"author" => in_author = false,
                _ => field = None,
            },
            Event::Eof => break,
            _ => {}
        }

        buffer.clear();
    }

    if !saw_feed {
        return Err(NormalizeError::malformed(Source::Arxiv, "missing <feed> root element"));
    }

    Ok(entries)
}

fn push_text(entry: &mut ArxivEntry, field: Field, text: &str) {
    match field {
        Field::Id => entry.id.push_str(text),
        Field::Title => entry.title.get_or_insert_with(String::new).push_str(text),
        Field::Summary => entry.summary.push_str(text),
        Field::Published => entry.published.push_str(text),
        Field::AuthorName => entry.authors.push(text.to_string()),
    }
}

fn take_pdf_link(entry: &mut ArxivEntry, element: &BytesStart<'_>) {
    if entry.pdf_url.is_some() {
        return;
    }

    let mut href = None;
    let mut is_pdf = false;
    for attr in element.attributes().filter_map(Result::ok) {
        let Ok(value) = attr.unescape_value() else { continue };
        match attr.key.local_name().as_ref() {
            b"href" => href = Some(value.into_owned()),
            b"type" => is_pdf = value == PDF_MIME,
            _ => {}
        }
    }

    if is_pdf {
        entry.pdf_url = href;
    }
}

/// Turn parsed entries into candidates.
///
/// Entries without a `<title>` get the `"No title"` placeholder so the
/// acceptance gate drops them.
#[must_use]
pub fn extract(entries: Vec<ArxivEntry>) -> Vec<Candidate> {
    entries
        .into_iter()
        .map(|entry| {
            let title = entry
                .title
                .map_or_else(|| PLACEHOLDER_TITLE.to_string(), |t| collapse_whitespace(&t));
            Candidate {
                title,
                authors: entry
                    .authors
                    .iter()
                    .map(|a| collapse_whitespace(a))
                    .filter(|a| !a.is_empty())
                    .collect(),
                year: parse_year_str(&entry.published),
                r#abstract: entry.summary.trim().to_string(),
                url: entry.id.trim().to_string(),
                pdf_url: entry.pdf_url,
                ..Default::default()
            }
        })
        .collect()
}

/// Parse and extract an Atom feed in one step.
///
/// # Errors
///
/// Returns an error when the feed is not well-formed.
pub fn extract_feed(xml: &str) -> NormalizeResult<Vec<Candidate>> {
    parse_feed(xml).map(extract)
}

/// Search query sent to arXiv: the user query or the topic itself.
#[must_use]
pub fn search_query(query: &str) -> String {
    format!("all:\"{query}\" OR all:\"time series\"")
}

/// arXiv adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArxivSource;

#[async_trait::async_trait]
impl MetadataSource for ArxivSource {
    fn source(&self) -> Source {
        Source::Arxiv
    }

    async fn search(
        &self,
        client: &HarvestClient,
        query: &str,
        max_results: usize,
    ) -> ClientResult<Vec<UnifiedRecord>> {
        let max_results = max_results.min(api::MAX_RESULTS_CAP);
        let query_string = search_query(query);
        tracing::info!(query = %query_string, max_results, "Searching arXiv");

        let params = params([
            ("search_query", query_string),
            ("start", "0".to_string()),
            ("max_results", max_results.to_string()),
            ("sortBy", "relevance".to_string()),
            ("sortOrder", "descending".to_string()),
        ]);

        let xml = client.get_text(&client.config().arxiv_api_url, &params).await?;
        tracing::debug!(bytes = xml.len(), "arXiv response received");

        let candidates = extract_feed(&xml)?;
        Ok(finish(Source::Arxiv, candidates))
    }
}
