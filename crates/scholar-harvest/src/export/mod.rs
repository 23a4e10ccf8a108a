//! Citation export engine.
//!
//! Every exporter takes rows in caller order and returns a new string;
//! rows are never reordered or mutated, and the same input always gives
//! byte-identical output.

pub mod bibtex;
pub mod ris;
pub mod tabular;
pub mod zotero;

use crate::error::{ExportError, ExportResult};
use crate::models::{ExportFormat, RecordRow};

/// Render `rows` in `format`.
///
/// # Errors
///
/// Returns error if a CSV or JSON writer fails.
pub fn export(rows: &[RecordRow], format: ExportFormat) -> ExportResult<String> {
    tracing::debug!(rows = rows.len(), format = ?format, "Exporting");
    match format {
        ExportFormat::Bibtex => Ok(bibtex::render(rows)),
        ExportFormat::Ris => Ok(ris::render(rows)),
        ExportFormat::Zotero => zotero::render(rows),
        ExportFormat::Csv => tabular::render_csv(rows),
        ExportFormat::Json => tabular::render_json(rows),
    }
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> ExportResult<String> {
    let bytes = writer.into_inner().map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
