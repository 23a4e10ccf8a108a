//! Configuration for the harvester.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// arXiv Atom query endpoint.
    pub const ARXIV_API: &str = "http://export.arxiv.org/api/query";

    /// CrossRef works endpoint.
    pub const CROSSREF_API: &str = "https://api.crossref.org/works";

    /// Internet Archive advanced search endpoint.
    pub const ARCHIVE_API: &str = "https://archive.org/advancedsearch.php";

    /// Shared User-Agent for every source.
    pub const USER_AGENT: &str = "TimeSeriesBookScraper/1.0 (Educational Research Tool)";

    /// Contact address for the CrossRef polite pool.
    pub const CROSSREF_MAILTO: &str = "researcher@example.com";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Pause between two source passes.
    pub const SOURCE_PAUSE: Duration = Duration::from_secs(2);

    /// Retries for transient failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Hard cap on results requested from arXiv and CrossRef.
    pub const MAX_RESULTS_CAP: usize = 100;

    /// Rows requested from Internet Archive.
    pub const ARCHIVE_ROWS: usize = 50;

    /// Maximum idle connections kept per host.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Default SQLite file, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "timeseries_books.db";

/// Harvester configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// arXiv endpoint (overridable for mock servers).
    pub arxiv_api_url: String,

    /// CrossRef endpoint.
    pub crossref_api_url: String,

    /// Internet Archive endpoint.
    pub archive_api_url: String,

    /// CrossRef `mailto` parameter.
    pub crossref_mailto: String,

    /// SQLite database path.
    pub db_path: PathBuf,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Pause between sources.
    pub source_pause: Duration,

    /// Retry attempts for transient HTTP failures.
    pub max_retries: u32,
}

impl Config {
    /// Create a configuration for the public endpoints.
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            arxiv_api_url: api::ARXIV_API.to_string(),
            crossref_api_url: api::CROSSREF_API.to_string(),
            archive_api_url: api::ARCHIVE_API.to_string(),
            crossref_mailto: api::CROSSREF_MAILTO.to_string(),
            db_path: db_path.into(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            source_pause: api::SOURCE_PAUSE,
            max_retries: api::MAX_RETRIES,
        }
    }

    /// Create a test configuration pointing every source at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            arxiv_api_url: format!("{base_url}/api/query"),
            crossref_api_url: format!("{base_url}/works"),
            archive_api_url: format!("{base_url}/advancedsearch.php"),
            crossref_mailto: "test@example.com".to_string(),
            db_path: PathBuf::from(":memory:"),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            source_pause: Duration::ZERO, // No pause in tests
            max_retries: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `HARVEST_DB_PATH`, `CROSSREF_MAILTO` and
    /// `HARVEST_SOURCE_PAUSE_MS`; unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if `HARVEST_SOURCE_PAUSE_MS` is not an integer.
    pub fn from_env() -> anyhow::Result<Self> {
        let db_path =
            std::env::var("HARVEST_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let mut config = Self::new(db_path);

        if let Ok(mailto) = std::env::var("CROSSREF_MAILTO") {
            config.crossref_mailto = mailto;
        }

        if let Ok(pause) = std::env::var("HARVEST_SOURCE_PAUSE_MS") {
            let millis: u64 = pause
                .parse()
                .map_err(|e| anyhow::anyhow!("HARVEST_SOURCE_PAUSE_MS must be milliseconds: {e}"))?;
            config.source_pause = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
