//! Scholar Harvest - Entry Point
//!
//! Harvests records into a local SQLite store, queries it, and exports
//! result sets for reference managers.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_harvest::config::{Config, DEFAULT_DB_PATH};
use scholar_harvest::export::export;
use scholar_harvest::formatters::{
    ResultSummary, compact_records, format_records_markdown, format_summary_markdown,
};
use scholar_harvest::harvest::{MAX_MAX_RESULTS, MIN_MAX_RESULTS};
use scholar_harvest::models::{ExportFormat, RecordRow, Source};
use scholar_harvest::store::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
use scholar_harvest::{HarvestClient, Harvester, RecordQuery, RecordStore};

#[derive(Parser, Debug)]
#[command(name = "scholar-harvest")]
#[command(about = "Harvest and export open-access time series literature")]
#[command(version)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "HARVEST_DB_PATH", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search metadata sources and store the accepted records
    Search {
        /// Search terms
        query: String,

        /// Source to search (arxiv, crossref, archive, ndltd); repeatable
        #[arg(long = "source", default_value = "arxiv")]
        sources: Vec<Source>,

        /// Maximum results per source
        #[arg(long, default_value_t = 50)]
        max_results: usize,
    },

    /// Query the local store
    Query {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print compact JSON instead of Markdown
        #[arg(long)]
        json: bool,
    },

    /// Export matching records from the local store
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output format: csv, json, bibtex, ris (endnote), zotero
        #[arg(long, default_value = "bibtex")]
        format: ExportFormat,

        /// Output file (default: timeseries_books_<YYYYMMDD>.<ext>)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Match against title, authors or abstract
    terms: Option<String>,

    /// Source label filter (substring)
    #[arg(long)]
    source: Option<String>,

    /// Document type filter (substring)
    #[arg(long)]
    document_type: Option<String>,

    /// Earliest publication year
    #[arg(long, default_value_t = DEFAULT_MIN_YEAR)]
    min_year: i32,

    /// Latest publication year
    #[arg(long, default_value_t = DEFAULT_MAX_YEAR)]
    max_year: i32,

    /// Ignore the year range and include records without a year
    #[arg(long)]
    any_year: bool,
}

impl FilterArgs {
    fn to_query(&self) -> RecordQuery {
        let mut query = if self.any_year {
            RecordQuery::all()
        } else {
            RecordQuery::default().with_years(self.min_year, self.max_year)
        };
        query.text.clone_from(&self.terms);
        query.source.clone_from(&self.source);
        query.document_type.clone_from(&self.document_type);
        query
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), db = %cli.db.display(), "Starting scholar-harvest");

    let mut config = Config::from_env()?;
    config.db_path.clone_from(&cli.db);
    let mut store = RecordStore::open(&config.db_path)?;

    match cli.command {
        Command::Search { query, sources, max_results } => {
            run_search(config, &mut store, &query, &sources, max_results).await
        }
        Command::Query { filters, json } => run_query(&store, &filters, json),
        Command::Export { filters, format, output } => {
            run_export(&store, &filters, format, output)
        }
    }
}

async fn run_search(
    config: Config,
    store: &mut RecordStore,
    query: &str,
    sources: &[Source],
    max_results: usize,
) -> anyhow::Result<()> {
    if !(MIN_MAX_RESULTS..=MAX_MAX_RESULTS).contains(&max_results) {
        anyhow::bail!("--max-results must be between {MIN_MAX_RESULTS} and {MAX_MAX_RESULTS}");
    }

    let harvester = Harvester::new(HarvestClient::new(config)?);
    let report = harvester
        .run(query, sources, max_results)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_user_message()))?;

    let summary = store.save_records(&report.records)?;

    for outcome in &report.outcomes {
        match &outcome.error {
            Some(error) => match outcome.retry_after {
                Some(wait) => {
                    println!("{}: failed ({error}); retry in {}s", outcome.source, wait.as_secs());
                }
                None => println!("{}: failed ({error})", outcome.source),
            },
            None => println!("{}: {} records", outcome.source, outcome.accepted),
        }
    }
    println!(
        "Found {} records: {} new, {} already stored",
        report.total(),
        summary.inserted,
        summary.duplicates
    );

    let rows: Vec<RecordRow> = report.records.iter().map(|r| RecordRow::from_record(0, r)).collect();
    if !rows.is_empty() {
        println!("\n{}", format_records_markdown(&rows));
    }

    Ok(())
}

fn run_query(store: &RecordStore, filters: &FilterArgs, json: bool) -> anyhow::Result<()> {
    let rows = store.search(&filters.to_query())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&compact_records(&rows))?);
    } else {
        if !rows.is_empty() {
            println!("{}", format_summary_markdown(&ResultSummary::from_rows(&rows)));
        }
        println!("{}", format_records_markdown(&rows));
    }

    Ok(())
}

fn run_export(
    store: &RecordStore,
    filters: &FilterArgs,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let rows = store.search(&filters.to_query())?;
    if rows.is_empty() {
        println!("No records match the filters; nothing exported.");
        return Ok(());
    }

    let content = export(&rows, format)?;
    let path = output
        .unwrap_or_else(|| PathBuf::from(format.file_name(chrono::Local::now().date_naive())));
    std::fs::write(&path, content)?;

    tracing::info!(rows = rows.len(), path = %path.display(), format = ?format, "Export written");
    println!("Exported {} records to {}", rows.len(), path.display());

    Ok(())
}
