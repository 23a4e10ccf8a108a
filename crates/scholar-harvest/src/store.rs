//! SQLite record store.
//!
//! One `books` table; a record's identity is its exact `(title, source)`
//! pair. Citation keys that collide with a stored key get a letter suffix
//! (`Doe2020Advances`, `Doe2020Advancesa`, `Doe2020Advancesb`, ...).

use std::ops::RangeInclusive;
use std::path::Path;

use rusqlite::Connection;
use rusqlite::types::Value;

use crate::error::StoreResult;
use crate::models::{RecordRow, UnifiedRecord};
use crate::pipeline::relevance;

/// Lower bound of the default year filter.
pub const DEFAULT_MIN_YEAR: i32 = 1900;

/// Upper bound of the default year filter.
pub const DEFAULT_MAX_YEAR: i32 = 2024;

const CREATE_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    authors TEXT,
    year INTEGER,
    source TEXT NOT NULL,
    url TEXT,
    doi TEXT,
    abstract TEXT,
    keywords TEXT,
    pdf_url TEXT,
    license_type TEXT,
    relevance_score REAL,
    document_type TEXT,
    journal TEXT,
    publisher TEXT,
    pages TEXT,
    volume TEXT,
    issue TEXT,
    isbn TEXT,
    bibtex_key TEXT,
    date_added TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_books_title_source ON books(title, source);
CREATE INDEX IF NOT EXISTS idx_books_bibtex_key ON books(bibtex_key);
";

const ROW_COLUMNS: &str = "id, title, authors, year, source, url, doi, abstract, pdf_url, \
     license_type, relevance_score, document_type, journal, publisher, pages, volume, issue, \
     isbn, bibtex_key, date_added";

/// Outcome of [`RecordStore::save_records`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveSummary {
    /// Rows written.
    pub inserted: usize,
    /// Records skipped because `(title, source)` was already stored.
    pub duplicates: usize,
    /// Inserted records whose citation key had to be suffixed.
    pub renamed_keys: usize,
}

/// Filter for [`RecordStore::search`].
///
/// Text filters are case-insensitive substring matches. The default year
/// range is 1900-2024; rows without a year never match a year range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    /// Matched against title, authors and abstract.
    pub text: Option<String>,
    /// Matched against the source label.
    pub source: Option<String>,
    /// Matched against the document type label.
    pub document_type: Option<String>,
    /// Inclusive year range, `None` for any year including unknown.
    pub years: Option<RangeInclusive<i32>>,
    /// Maximum rows returned.
    pub limit: Option<usize>,
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            text: None,
            source: None,
            document_type: None,
            years: Some(DEFAULT_MIN_YEAR..=DEFAULT_MAX_YEAR),
            limit: None,
        }
    }
}

impl RecordQuery {
    /// Query matching every stored row.
    #[must_use]
    pub const fn all() -> Self {
        Self { text: None, source: None, document_type: None, years: None, limit: None }
    }

    /// Filter on title, authors or abstract.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Filter on source label.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Filter on document type label.
    #[must_use]
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = Some(document_type.into());
        self
    }

    /// Restrict to an inclusive year range.
    #[must_use]
    pub const fn with_years(mut self, min: i32, max: i32) -> Self {
        self.years = Some(min..=max);
        self
    }

    /// Cap the number of rows.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn to_sql(&self) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some(text) = non_blank(self.text.as_deref()) {
            clauses.push("(title LIKE ? OR authors LIKE ? OR abstract LIKE ?)");
            let pattern = format!("%{text}%");
            values.extend(std::iter::repeat_n(Value::Text(pattern), 3));
        }
        if let Some(source) = non_blank(self.source.as_deref()) {
            clauses.push("source LIKE ?");
            values.push(Value::Text(format!("%{source}%")));
        }
        if let Some(document_type) = non_blank(self.document_type.as_deref()) {
            clauses.push("document_type LIKE ?");
            values.push(Value::Text(format!("%{document_type}%")));
        }
        if let Some(years) = &self.years {
            clauses.push("year BETWEEN ? AND ?");
            values.push(Value::Integer(i64::from(*years.start())));
            values.push(Value::Integer(i64::from(*years.end())));
        }

        let mut sql = format!("SELECT {ROW_COLUMNS} FROM books");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY relevance_score DESC, year DESC, id ASC");
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            values.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
        }

        (sql, values)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Persistent store of harvested records.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) a store at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    ///
    /// # Errors
    ///
    /// Returns error if SQLite cannot allocate the database.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(CREATE_TABLES)?;
        Ok(())
    }

    /// Insert records that are not stored yet, in order, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns error on any SQLite failure; nothing is written in that case.
    pub fn save_records(&mut self, records: &[UnifiedRecord]) -> StoreResult<SaveSummary> {
        let tx = self.conn.transaction()?;
        let mut summary = SaveSummary::default();

        for record in records {
            if is_stored(&tx, record)? {
                tracing::debug!(title = %record.title, source = %record.source, "Skipping duplicate");
                summary.duplicates += 1;
                continue;
            }

            let key = unique_key(&tx, &record.bibtex_key)?;
            if key != record.bibtex_key {
                summary.renamed_keys += 1;
            }

            let keywords = relevance::matched_keywords(&record.title, &record.r#abstract).join(", ");

            tx.execute(
                r"
                INSERT INTO books
                (title, authors, year, source, url, doi, abstract, keywords, pdf_url, license_type,
                 relevance_score, document_type, journal, publisher, pages, volume, issue, isbn, bibtex_key)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
                ",
                rusqlite::params![
                    record.title,
                    record.author_names(),
                    record.year,
                    record.source.label(),
                    record.url,
                    record.doi,
                    record.r#abstract,
                    keywords,
                    record.pdf_url,
                    record.license_type.label(),
                    record.relevance_score,
                    record.document_type.label(),
                    record.journal,
                    record.publisher,
                    record.pages,
                    record.volume,
                    record.issue,
                    record.isbn,
                    key,
                ],
            )?;
            summary.inserted += 1;
        }

        tx.commit()?;
        tracing::info!(
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            renamed_keys = summary.renamed_keys,
            "Saved records"
        );
        Ok(summary)
    }

    /// Rows matching `query`, highest relevance first, then newest.
    ///
    /// # Errors
    ///
    /// Returns error on SQLite failure.
    pub fn search(&self, query: &RecordQuery) -> StoreResult<Vec<RecordRow>> {
        let (sql, values) = query.to_sql();
        let mut stmt = self.conn.prepare(&sql)?;

        let rows = stmt
            .query_map(rusqlite::params_from_iter(values.iter()), Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Number of stored rows.
    ///
    /// # Errors
    ///
    /// Returns error on SQLite failure.
    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordRow> {
        Ok(RecordRow {
            id: row.get(0)?,
            title: row.get(1)?,
            authors: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            year: row.get(3)?,
            source: row.get(4)?,
            url: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            doi: row.get(6)?,
            r#abstract: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            pdf_url: row.get(8)?,
            license_type: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
            relevance_score: row.get::<_, Option<f64>>(10)?.unwrap_or_default(),
            document_type: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
            journal: row.get(12)?,
            publisher: row.get(13)?,
            pages: row.get(14)?,
            volume: row.get(15)?,
            issue: row.get(16)?,
            isbn: row.get(17)?,
            bibtex_key: row.get(18)?,
            date_added: row.get(19)?,
        })
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").field("path", &self.conn.path()).finish()
    }
}

fn is_stored(conn: &Connection, record: &UnifiedRecord) -> StoreResult<bool> {
    let (title, source) = record.dedup_key();
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM books WHERE title = ?1 AND source = ?2",
        rusqlite::params![title, source.label()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn key_taken(conn: &Connection, key: &str) -> StoreResult<bool> {
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM books WHERE bibtex_key = ?1", [key], |row| row.get(0))?;
    Ok(count > 0)
}

/// `base`, or `base` plus the first free letter suffix.
fn unique_key(conn: &Connection, base: &str) -> StoreResult<String> {
    if !key_taken(conn, base)? {
        return Ok(base.to_string());
    }

    let mut n = 0;
    loop {
        let candidate = format!("{base}{}", letter_suffix(n));
        if !key_taken(conn, &candidate)? {
            return Ok(candidate);
        }
        n += 1;
    }
}

/// 0 -> "a", 25 -> "z", 26 -> "aa", 27 -> "ab", ...
fn letter_suffix(mut n: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'a' + u8::try_from(n % 26).unwrap_or_default()));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}
