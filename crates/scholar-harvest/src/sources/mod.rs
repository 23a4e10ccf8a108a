//! Metadata source adapters.
//!
//! Each source module provides:
//! 1. Typed payload shapes for one API response
//! 2. A pure extractor from payload to [`Candidate`]s
//! 3. A [`MetadataSource`] that fetches, extracts and assembles

pub mod archive;
pub mod arxiv;
pub mod crossref;
pub mod ndltd;

pub use archive::InternetArchiveSource;
pub use arxiv::ArxivSource;
pub use crossref::CrossrefSource;
pub use ndltd::NdltdSource;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::HarvestClient;
use crate::error::{ClientResult, NormalizeError, NormalizeResult};
use crate::models::{Candidate, Source, UnifiedRecord};

/// Trait for searchable metadata sources.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    /// Which source this adapter talks to.
    fn source(&self) -> Source;

    /// Fetch candidates for `query` and assemble the accepted records.
    ///
    /// Individual malformed items are skipped; only transport failures and
    /// malformed top-level payloads are errors.
    async fn search(
        &self,
        client: &HarvestClient,
        query: &str,
        max_results: usize,
    ) -> ClientResult<Vec<UnifiedRecord>>;
}

/// Register all sources, in harvest order.
#[must_use]
pub fn register_all_sources() -> Vec<Box<dyn MetadataSource>> {
    Source::ALL.into_iter().map(source_for).collect()
}

/// The adapter for one source.
#[must_use]
pub fn source_for(source: Source) -> Box<dyn MetadataSource> {
    match source {
        Source::Arxiv => Box::new(ArxivSource),
        Source::Crossref => Box::new(CrossrefSource),
        Source::InternetArchive => Box::new(InternetArchiveSource),
        Source::Ndltd => Box::new(NdltdSource),
    }
}

/// Follow `path` through nested objects to an array.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedPayload`] when a step is missing or
/// the final value is not an array.
pub(crate) fn array_at<'a>(
    payload: &'a Value,
    origin: Source,
    path: &[&str],
) -> NormalizeResult<&'a [Value]> {
    let mut current = payload;
    for key in path {
        current = current
            .as_object()
            .and_then(|obj| obj.get(*key))
            .ok_or_else(|| NormalizeError::malformed(origin, format!("missing '{}'", path.join("."))))?;
    }

    current
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| NormalizeError::malformed(origin, format!("'{}' is not a list", path.join("."))))
}

/// Decode each item independently, skipping the ones that do not fit `T`.
pub(crate) fn decode_items<T: DeserializeOwned>(origin: Source, items: &[Value]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(source = %origin, index, error = %e, "Skipping malformed item");
                None
            }
        })
        .collect()
}

/// Trim and drop empty strings.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Log and assemble a batch of candidates.
pub(crate) fn finish(source: Source, candidates: Vec<Candidate>) -> Vec<UnifiedRecord> {
    tracing::debug!(source = %source, candidates = candidates.len(), "Extracted candidates");
    crate::pipeline::assemble(source, candidates)
}
