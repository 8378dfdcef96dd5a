//! Export subsystem
//!
//! Serializes a result batch to CSV or JSON. Writes are not atomic: a
//! failure mid-write can leave a truncated file behind; the in-memory
//! batch is never affected and the export can be retried.

use crate::results::ResultRecord;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Conventional file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

/// Errors reported by [`write_batch`]
#[derive(Debug, Error)]
pub enum ExportError {
    /// Exporting an empty batch is a caller-side usage error
    #[error("no search results to export")]
    NoResults,
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write a non-empty batch to `path` in the given format
///
/// An empty batch is rejected before any file is created.
pub fn write_batch(
    records: &[ResultRecord],
    format: ExportFormat,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoResults);
    }

    let path = path.as_ref();
    match format {
        ExportFormat::Csv => write_csv(records, path)?,
        ExportFormat::Json => write_json(records, path)?,
    }

    info!(
        "Exported {} results to {} ({})",
        records.len(),
        path.display(),
        format
    );
    Ok(())
}

fn write_csv(records: &[ResultRecord], path: &Path) -> Result<(), ExportError> {
    let mut out = String::from("title,url\n");
    for record in records {
        out.push_str(&csv_field(&record.title));
        out.push(',');
        out.push_str(&csv_field(&record.url));
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}

/// RFC-4180-style quoting: quote when the field contains a delimiter,
/// quote, or line break, doubling embedded quotes
fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_json(records: &[ResultRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut ser)?;

    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
