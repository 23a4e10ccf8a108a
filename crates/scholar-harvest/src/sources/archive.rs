//! Internet Archive advanced search adapter.

use serde::Deserialize;
use serde_json::Value;

use super::{MetadataSource, array_at, decode_items, finish};
use crate::client::{HarvestClient, params};
use crate::config::api;
use crate::error::{ClientResult, NormalizeResult};
use crate::models::field::{collapse_whitespace, first_text};
use crate::models::{Candidate, OneOrMany, Source, UnifiedRecord, YearValue, parse_year};

/// Fields requested from the advanced search endpoint.
pub const FIELDS: &str = "identifier,title,creator,year,description,downloads,format";

/// One element of `response.docs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchiveDoc {
    /// Item identifier.
    #[serde(default)]
    pub identifier: Option<String>,
    /// Title.
    #[serde(default)]
    pub title: Option<OneOrMany<String>>,
    /// Creator(s).
    #[serde(default)]
    pub creator: Option<OneOrMany<String>>,
    /// Year in any shape.
    #[serde(default)]
    pub year: Option<YearValue>,
    /// Description paragraph(s).
    #[serde(default)]
    pub description: Option<OneOrMany<String>>,
}

impl ArchiveDoc {
    /// Convert to a candidate.
    ///
    /// Multi-part descriptions are joined with spaces.
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        let identifier = self.identifier.unwrap_or_default().trim().to_string();
        let (url, pdf_url) = if identifier.is_empty() {
            (String::new(), None)
        } else {
            (
                format!("https://archive.org/details/{identifier}"),
                Some(format!("https://archive.org/download/{identifier}/{identifier}.pdf")),
            )
        };

        let description = self.description.map(OneOrMany::into_vec).unwrap_or_default().join(" ");

        Candidate {
            title: collapse_whitespace(&first_text(self.title.as_ref())),
            authors: self
                .creator
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .iter()
                .map(|c| collapse_whitespace(c))
                .filter(|c| !c.is_empty())
                .collect(),
            year: self.year.as_ref().and_then(parse_year),
            r#abstract: description.trim().to_string(),
            url,
            pdf_url,
            ..Default::default()
        }
    }
}

/// Extract candidates from an advanced search response.
///
/// # Errors
///
/// Returns an error when `response.docs` is missing or not a list.
pub fn extract(payload: &Value) -> NormalizeResult<Vec<Candidate>> {
    let docs = array_at(payload, Source::InternetArchive, &["response", "docs"])?;
    Ok(decode_items::<ArchiveDoc>(Source::InternetArchive, docs)
        .into_iter()
        .map(ArchiveDoc::into_candidate)
        .collect())
}

/// Query restricted to text items.
#[must_use]
pub fn search_query(query: &str) -> String {
    format!("({query}) AND mediatype:texts")
}

/// Internet Archive adapter. Always requests a fixed page of rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternetArchiveSource;

#[async_trait::async_trait]
impl MetadataSource for InternetArchiveSource {
    fn source(&self) -> Source {
        Source::InternetArchive
    }

    async fn search(
        &self,
        client: &HarvestClient,
        query: &str,
        _max_results: usize,
    ) -> ClientResult<Vec<UnifiedRecord>> {
        let q = search_query(query);
        tracing::info!(query = %q, "Searching Internet Archive");

        let params = params([
            ("q", q),
            ("fl", FIELDS.to_string()),
            ("rows", api::ARCHIVE_ROWS.to_string()),
            ("page", "1".to_string()),
            ("output", "json".to_string()),
        ]);

        let payload = client.get_json(&client.config().archive_api_url, &params).await?;
        if let Some(found) = payload.pointer("/response/numFound").and_then(Value::as_u64) {
            tracing::debug!(found, "Internet Archive total results");
        }

        let candidates = extract(&payload)?;
        Ok(finish(Source::InternetArchive, candidates))
    }
}
