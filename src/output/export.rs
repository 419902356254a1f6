//! Spreadsheet export
//!
//! Writes a set of records as CSV: a header row with the table columns and
//! one row per record. Fields that contain the separator, quotes or line
//! breaks are quoted, with embedded quotes doubled.

use crate::book::BookRecord;
use crate::output::table::{row_cells, COLUMNS};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const SEPARATOR: char = ',';
const EXTENSION: &str = "csv";

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export path cannot be empty")]
    EmptyPath,

    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Resolves the file actually written for a requested name
///
/// The content is always CSV, so any other extension (`.xlsx`, `.txt`) is
/// replaced with `.csv` and a bare name gets `.csv` appended.
pub fn export_path(requested: &str) -> ExportResult<PathBuf> {
    let requested = requested.trim();
    if requested.is_empty() {
        return Err(ExportError::EmptyPath);
    }

    let mut path = PathBuf::from(requested);
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(EXTENSION))
        .unwrap_or(false);
    if !is_csv {
        path.set_extension(EXTENSION);
    }
    Ok(path)
}

/// Writes `records` to the file named by `requested`
///
/// Missing parent directories are created. Returns the path actually written.
pub fn export_records<'a, I>(records: I, requested: &str) -> ExportResult<PathBuf>
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let path = export_path(requested)?;
    let wrap = |source: io::Error| ExportError::Write {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(wrap)?;
        }
    }

    let file = File::create(&path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, records).map_err(wrap)?;
    writer.flush().map_err(wrap)?;

    tracing::debug!("Exported table to {}", path.display());
    Ok(path)
}

/// Writes the header row and one row per record to any writer
pub fn write_records<'a, W, I>(mut w: W, records: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a BookRecord>,
{
    write_row(&mut w, &COLUMNS)?;
    for record in records {
        write_row(&mut w, &row_cells(record))?;
    }
    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(SEPARATOR) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row
fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{}", SEPARATOR)?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}
