//! Sequential multi-source harvest driver.

use std::collections::HashSet;
use std::time::Duration;

use crate::client::HarvestClient;
use crate::error::{HarvestError, HarvestResult};
use crate::models::{Source, UnifiedRecord};
use crate::sources::{MetadataSource, source_for};

/// Smallest per-source result count a caller may ask for.
pub const MIN_MAX_RESULTS: usize = 10;

/// Largest per-source result count a caller may ask for.
pub const MAX_MAX_RESULTS: usize = 100;

/// What one source pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    /// Source searched.
    pub source: Source,
    /// Records accepted by the gate.
    pub accepted: usize,
    /// Failure message when the pass was abandoned.
    pub error: Option<String>,
    /// Wait suggested by the source when it rate limited the pass.
    pub retry_after: Option<Duration>,
}

/// Result of a harvest across several sources.
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    /// Accepted records, source by source in visiting order.
    pub records: Vec<UnifiedRecord>,
    /// One entry per source visited.
    pub outcomes: Vec<SourceOutcome>,
}

impl HarvestReport {
    /// Total accepted records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Sources whose pass failed.
    #[must_use]
    pub fn failed_sources(&self) -> Vec<Source> {
        self.outcomes.iter().filter(|o| o.error.is_some()).map(|o| o.source).collect()
    }
}

/// Runs source passes one after another with a pause in between.
#[derive(Debug, Clone)]
pub struct Harvester {
    client: HarvestClient,
}

impl Harvester {
    /// Create a harvester over a configured client.
    #[must_use]
    pub const fn new(client: HarvestClient) -> Self {
        Self { client }
    }

    /// Search each source in order.
    ///
    /// Repeated sources are searched once, at their first position.
    /// A failing source is logged and recorded in the report; the remaining
    /// sources still run.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank query, no sources, or a
    /// `max_results` outside `10..=100`.
    pub async fn run(
        &self,
        query: &str,
        sources: &[Source],
        max_results: usize,
    ) -> HarvestResult<HarvestReport> {
        let mut seen = HashSet::new();
        let adapters: Vec<Box<dyn MetadataSource>> =
            sources.iter().copied().filter(|s| seen.insert(*s)).map(source_for).collect();
        self.run_with(query, &adapters, max_results).await
    }

    /// [`Harvester::run`] over explicit adapters.
    ///
    /// # Errors
    ///
    /// Same validation as [`Harvester::run`].
    pub async fn run_with(
        &self,
        query: &str,
        adapters: &[Box<dyn MetadataSource>],
        max_results: usize,
    ) -> HarvestResult<HarvestReport> {
        let query = query.trim();
        if query.is_empty() {
            return Err(HarvestError::validation("query", "must not be empty"));
        }
        if adapters.is_empty() {
            return Err(HarvestError::validation("sources", "select at least one source"));
        }
        if !(MIN_MAX_RESULTS..=MAX_MAX_RESULTS).contains(&max_results) {
            return Err(HarvestError::validation(
                "max_results",
                format!("must be between {MIN_MAX_RESULTS} and {MAX_MAX_RESULTS}"),
            ));
        }

        let pause = self.client.config().source_pause;
        let mut report = HarvestReport::default();

        for (index, adapter) in adapters.iter().enumerate() {
            if index > 0 && !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }

            let source = adapter.source();
            match adapter.search(&self.client, query, max_results).await {
                Ok(records) => {
                    tracing::info!(source = %source, found = records.len(), "Source pass complete");
                    report.outcomes.push(SourceOutcome {
                        source,
                        accepted: records.len(),
                        error: None,
                        retry_after: None,
                    });
                    report.records.extend(records);
                }
                Err(e) => {
                    let retry_after = e.retry_after();
                    tracing::error!(
                        source = %source,
                        error = %e,
                        retry_after_secs = retry_after.map(|d| d.as_secs()),
                        "Source pass failed"
                    );
                    report.outcomes.push(SourceOutcome {
                        source,
                        accepted: 0,
                        error: Some(e.to_string()),
                        retry_after,
                    });
                }
            }
        }

        tracing::info!(total = report.total(), sources = adapters.len(), "Harvest complete");
        Ok(report)
    }
}
