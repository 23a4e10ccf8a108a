//! NDLTD (theses and dissertations) adapter.
//!
//! The NDLTD search API is not publicly reachable, so [`NdltdSource`]
//! returns no results. The extractor still handles the Solr-style
//! document shape so a live endpoint can be wired in later.

use serde::Deserialize;
use serde_json::Value;

use super::{MetadataSource, array_at, decode_items, finish, present};
use crate::client::HarvestClient;
use crate::error::{ClientResult, NormalizeResult};
use crate::models::field::{collapse_whitespace, first_text};
use crate::models::{Candidate, OneOrMany, Source, UnifiedRecord, YearValue, parse_year};

/// One element of `response.docs`. Every field may be a scalar or a list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NdltdDoc {
    /// Title.
    #[serde(default)]
    pub title: Option<OneOrMany<String>>,
    /// Author(s).
    #[serde(default)]
    pub author: Option<OneOrMany<String>>,
    /// Year in any shape.
    #[serde(default)]
    pub year: Option<YearValue>,
    /// Abstract.
    #[serde(default)]
    pub description: Option<OneOrMany<String>>,
    /// Landing page.
    #[serde(default)]
    pub url: Option<OneOrMany<String>>,
    /// Degree, e.g. "Ph.D." or "M.S.".
    #[serde(default)]
    pub degree: Option<OneOrMany<String>>,
    /// Granting university.
    #[serde(default)]
    pub publisher: Option<OneOrMany<String>>,
}

impl NdltdDoc {
    /// Convert to a candidate.
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        Candidate {
            title: collapse_whitespace(&first_text(self.title.as_ref())),
            authors: self
                .author
                .map(OneOrMany::into_vec)
                .unwrap_or_default()
                .iter()
                .map(|a| collapse_whitespace(a))
                .filter(|a| !a.is_empty())
                .collect(),
            year: self.year.as_ref().and_then(parse_year),
            r#abstract: first_text(self.description.as_ref()).trim().to_string(),
            url: first_text(self.url.as_ref()).trim().to_string(),
            publisher: present(Some(first_text(self.publisher.as_ref()))),
            degree: present(Some(first_text(self.degree.as_ref()))),
            ..Default::default()
        }
    }
}

/// Extract candidates from a search response.
///
/// # Errors
///
/// Returns an error when `response.docs` is missing or not a list.
pub fn extract(payload: &Value) -> NormalizeResult<Vec<Candidate>> {
    let docs = array_at(payload, Source::Ndltd, &["response", "docs"])?;
    Ok(decode_items::<NdltdDoc>(Source::Ndltd, docs)
        .into_iter()
        .map(NdltdDoc::into_candidate)
        .collect())
}

/// Assemble records from an already fetched response.
///
/// # Errors
///
/// Returns an error when the payload shape is wrong.
pub fn records_from_payload(payload: &Value) -> NormalizeResult<Vec<UnifiedRecord>> {
    Ok(finish(Source::Ndltd, extract(payload)?))
}

/// NDLTD adapter (no live endpoint).
#[derive(Debug, Clone, Copy, Default)]
pub struct NdltdSource;

#[async_trait::async_trait]
impl MetadataSource for NdltdSource {
    fn source(&self) -> Source {
        Source::Ndltd
    }

    async fn search(
        &self,
        _client: &HarvestClient,
        query: &str,
        _max_results: usize,
    ) -> ClientResult<Vec<UnifiedRecord>> {
        tracing::info!(query, "NDLTD search unavailable, API access restricted");
        Ok(Vec::new())
    }
}
