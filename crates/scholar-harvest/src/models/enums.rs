//! Enumeration types shared by the pipeline, store and exporters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Metadata source a record was harvested from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    /// arXiv Atom API.
    #[serde(rename = "arXiv")]
    Arxiv,
    /// CrossRef works API.
    #[serde(rename = "CrossRef")]
    Crossref,
    /// Internet Archive advanced search.
    #[serde(rename = "Internet Archive")]
    InternetArchive,
    /// Networked Digital Library of Theses and Dissertations.
    #[serde(rename = "NDLTD")]
    Ndltd,
}

impl Source {
    /// Every source, in the order the harvester visits them.
    pub const ALL: [Self; 4] = [Self::Arxiv, Self::Crossref, Self::InternetArchive, Self::Ndltd];

    /// Display label, also the value stored in the `source` column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Arxiv => "arXiv",
            Self::Crossref => "CrossRef",
            Self::InternetArchive => "Internet Archive",
            Self::Ndltd => "NDLTD",
        }
    }

    /// License every record from this source is published under.
    ///
    /// CrossRef depends on the item itself, see [`LicenseType::for_crossref`].
    #[must_use]
    pub const fn default_license(self) -> LicenseType {
        match self {
            Self::Arxiv | Self::Crossref | Self::Ndltd => LicenseType::OpenAccess,
            Self::InternetArchive => LicenseType::PublicDomain,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arxiv" => Ok(Self::Arxiv),
            "crossref" => Ok(Self::Crossref),
            "internet archive" | "internet-archive" | "internetarchive" | "archive" | "ia" => {
                Ok(Self::InternetArchive)
            }
            "ndltd" | "ndltd (theses/dissertations)" => Ok(Self::Ndltd),
            other => Err(format!("unknown source '{other}'")),
        }
    }
}

/// Licensing status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseType {
    /// Openly licensed (arXiv, licensed CrossRef items, NDLTD).
    #[serde(rename = "Open Access")]
    OpenAccess,
    /// Public domain scans (Internet Archive).
    #[serde(rename = "Public Domain")]
    PublicDomain,
    /// Available under a publisher license.
    #[serde(rename = "Licensed")]
    Licensed,
}

impl LicenseType {
    /// CrossRef items are open access only when they declare a license.
    #[must_use]
    pub const fn for_crossref(license_count: usize) -> Self {
        if license_count > 0 { Self::OpenAccess } else { Self::Licensed }
    }

    /// Display label, also the value stored in the `license_type` column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OpenAccess => "Open Access",
            Self::PublicDomain => "Public Domain",
            Self::Licensed => "Licensed",
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LicenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open Access" => Ok(Self::OpenAccess),
            "Public Domain" => Ok(Self::PublicDomain),
            "Licensed" => Ok(Self::Licensed),
            other => Err(format!("unknown license type '{other}'")),
        }
    }
}

/// Kind of document a record describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Peer-reviewed journal article.
    #[default]
    #[serde(rename = "Research Article")]
    ResearchArticle,
    /// Monograph, handbook or textbook.
    #[serde(rename = "Book")]
    Book,
    /// Chapter of an edited book.
    #[serde(rename = "Book Chapter")]
    BookChapter,
    /// Paper in conference proceedings.
    #[serde(rename = "Conference Paper")]
    ConferencePaper,
    /// Master's-level thesis.
    #[serde(rename = "Thesis")]
    Thesis,
    /// Doctoral dissertation.
    #[serde(rename = "Dissertation")]
    Dissertation,
    /// Bachelor's-level thesis.
    #[serde(rename = "Undergraduate Thesis")]
    UndergraduateThesis,
    /// Unreviewed preprint.
    #[serde(rename = "Preprint")]
    Preprint,
    /// Institutional or technical report.
    #[serde(rename = "Technical Report")]
    TechnicalReport,
}

impl DocumentType {
    /// Every document type.
    pub const ALL: [Self; 9] = [
        Self::ResearchArticle,
        Self::Book,
        Self::BookChapter,
        Self::ConferencePaper,
        Self::Thesis,
        Self::Dissertation,
        Self::UndergraduateThesis,
        Self::Preprint,
        Self::TechnicalReport,
    ];

    /// Display label, also the value stored in the `document_type` column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ResearchArticle => "Research Article",
            Self::Book => "Book",
            Self::BookChapter => "Book Chapter",
            Self::ConferencePaper => "Conference Paper",
            Self::Thesis => "Thesis",
            Self::Dissertation => "Dissertation",
            Self::UndergraduateThesis => "Undergraduate Thesis",
            Self::Preprint => "Preprint",
            Self::TechnicalReport => "Technical Report",
        }
    }

    /// Look up a type by its exact label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown document type '{s}'"))
    }
}

/// Export format for reference managers and data tools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain CSV of the stored rows.
    Csv,
    /// JSON array of the stored rows.
    Json,
    /// BibTeX database.
    #[default]
    Bibtex,
    /// Research Information Systems format (EndNote import).
    #[serde(alias = "endnote")]
    Ris,
    /// Zotero import CSV.
    Zotero,
}

impl ExportFormat {
    /// Get the file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv | Self::Zotero => "csv",
            Self::Json => "json",
            Self::Bibtex => "bib",
            Self::Ris => "ris",
        }
    }

    /// Get the MIME type for this format.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Csv | Self::Zotero => "text/csv",
            Self::Json => "application/json",
            Self::Bibtex | Self::Ris => "text/plain",
        }
    }

    /// Default download file name for an export produced on `date`.
    #[must_use]
    pub fn file_name(self, date: chrono::NaiveDate) -> String {
        let stamp = date.format("%Y%m%d");
        match self {
            Self::Zotero => format!("timeseries_books_zotero_{stamp}.{}", self.extension()),
            _ => format!("timeseries_books_{stamp}.{}", self.extension()),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "bibtex" | "bib" => Ok(Self::Bibtex),
            "ris" | "endnote" => Ok(Self::Ris),
            "zotero" | "zotero-csv" => Ok(Self::Zotero),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}
