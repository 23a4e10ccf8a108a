//! Scholar Harvest
//!
//! Harvests open-access time series literature from arXiv, CrossRef and the
//! Internet Archive, normalizes every item into one record shape, scores and
//! classifies it, stores it in SQLite and exports curated result sets.
//!
//! # Features
//!
//! - **Normalization**: scalar-or-list fields and lenient year parsing
//! - **Relevance scoring**: fixed keyword weights, score in `[0, 1]`
//! - **Classification**: nine document types from weak textual signals
//! - **Export**: BibTeX, RIS/EndNote, Zotero CSV, CSV and JSON
//!
//! # Example
//!
//! ```no_run
//! use scholar_harvest::{Config, HarvestClient, Harvester, RecordStore};
//! use scholar_harvest::models::Source;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let mut store = RecordStore::open(&config.db_path)?;
//!     let harvester = Harvester::new(HarvestClient::new(config)?);
//!
//!     let report = harvester.run("forecasting", &[Source::Arxiv], 50).await?;
//!     store.save_records(&report.records)?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod formatters;
pub mod harvest;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod store;

pub use client::HarvestClient;
pub use config::Config;
pub use error::{ClientError, ExportError, HarvestError, NormalizeError, StoreError};
pub use harvest::{HarvestReport, Harvester};
pub use store::{RecordQuery, RecordStore};
