//! CrossRef works API adapter.

use serde::Deserialize;
use serde_json::Value;

use super::{MetadataSource, array_at, decode_items, finish, present};
use crate::client::{HarvestClient, params};
use crate::config::api;
use crate::error::{ClientResult, NormalizeResult};
use crate::models::field::{collapse_whitespace, first_text};
use crate::models::{Candidate, OneOrMany, Source, UnifiedRecord, YearValue, parse_year};
use crate::pipeline::PLACEHOLDER_TITLE;

/// One element of `message.items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossrefItem {
    /// Title list, first element used.
    #[serde(default)]
    pub title: Option<OneOrMany<String>>,

    /// Contributors.
    #[serde(default)]
    pub author: Vec<CrossrefAuthor>,

    /// Print publication date.
    #[serde(rename = "published-print", default)]
    pub published_print: Option<CrossrefDate>,

    /// Online publication date.
    #[serde(rename = "published-online", default)]
    pub published_online: Option<CrossrefDate>,

    /// Abstract (often JATS markup).
    #[serde(default)]
    pub r#abstract: Option<String>,

    /// DOI.
    #[serde(rename = "DOI", default)]
    pub doi: Option<String>,

    /// Journal or book title.
    #[serde(rename = "container-title", default)]
    pub container_title: Option<OneOrMany<String>>,

    /// Publisher name.
    #[serde(default)]
    pub publisher: Option<String>,

    /// Page range.
    #[serde(default)]
    pub page: Option<String>,

    /// Volume.
    #[serde(default)]
    pub volume: Option<String>,

    /// Issue.
    #[serde(default)]
    pub issue: Option<String>,

    /// ISBNs.
    #[serde(rename = "ISBN", default)]
    pub isbn: Option<OneOrMany<String>>,

    /// License entries; only their count matters.
    #[serde(default)]
    pub license: Vec<Value>,

    /// Work type code, e.g. `journal-article`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A CrossRef contributor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossrefAuthor {
    /// Given name.
    #[serde(default)]
    pub given: Option<String>,
    /// Family name.
    #[serde(default)]
    pub family: Option<String>,
}

impl CrossrefAuthor {
    /// `"<given> <family>"`, or `None` without a family name.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        let family = self.family.as_deref().map(str::trim).filter(|f| !f.is_empty())?;
        let given = self.given.as_deref().unwrap_or_default();
        Some(collapse_whitespace(&format!("{given} {family}")))
    }
}

/// A CrossRef partial date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrossrefDate {
    /// `[[year, month, day]]`, any part may be missing or null.
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<Option<YearValue>>>,
}

impl CrossrefDate {
    /// Year from the first date-part.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date_parts.first()?.first()?.as_ref().and_then(parse_year)
    }
}

impl CrossrefItem {
    /// Year from the print date, falling back to the online date.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.published_print
            .as_ref()
            .and_then(CrossrefDate::year)
            .or_else(|| self.published_online.as_ref().and_then(CrossrefDate::year))
    }

    /// Convert to a candidate.
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        let year = self.year();

        let title = collapse_whitespace(&first_text(self.title.as_ref()));
        let title = if title.is_empty() { PLACEHOLDER_TITLE.to_string() } else { title };

        let authors = self.author.iter().filter_map(CrossrefAuthor::display_name).collect();

        let doi = present(self.doi);
        let url = doi.as_ref().map(|d| format!("https://doi.org/{d}")).unwrap_or_default();

        Candidate {
            title,
            authors,
            year,
            r#abstract: self.r#abstract.unwrap_or_default().trim().to_string(),
            url,
            doi,
            pdf_url: None,
            journal: present(Some(first_text(self.container_title.as_ref()))),
            publisher: present(self.publisher),
            pages: present(self.page),
            volume: present(self.volume),
            issue: present(self.issue),
            isbn: present(Some(first_text(self.isbn.as_ref()))),
            native_type: present(self.kind),
            degree: None,
            license_count: self.license.len(),
        }
    }
}

/// Extract candidates from a works response.
///
/// # Errors
///
/// Returns an error when `message.items` is missing or not a list.
pub fn extract(payload: &Value) -> NormalizeResult<Vec<Candidate>> {
    let items = array_at(payload, Source::Crossref, &["message", "items"])?;
    Ok(decode_items::<CrossrefItem>(Source::Crossref, items)
        .into_iter()
        .map(CrossrefItem::into_candidate)
        .collect())
}

/// CrossRef adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossrefSource;

#[async_trait::async_trait]
impl MetadataSource for CrossrefSource {
    fn source(&self) -> Source {
        Source::Crossref
    }

    async fn search(
        &self,
        client: &HarvestClient,
        query: &str,
        max_results: usize,
    ) -> ClientResult<Vec<UnifiedRecord>> {
        let rows = max_results.min(api::MAX_RESULTS_CAP);
        tracing::info!(query, rows, "Searching CrossRef");

        let params = params([
            ("query", query.to_string()),
            ("filter", "has-license:true".to_string()),
            ("rows", rows.to_string()),
            ("sort", "relevance".to_string()),
            ("order", "desc".to_string()),
            ("mailto", client.config().crossref_mailto.clone()),
        ]);

        let payload = client.get_json(&client.config().crossref_api_url, &params).await?;
        if let Some(total) = payload.pointer("/message/total-results").and_then(Value::as_u64) {
            tracing::debug!(total, "CrossRef total results");
        }

        let candidates = extract(&payload)?;
        Ok(finish(Source::Crossref, candidates))
    }
}
