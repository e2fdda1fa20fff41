//! CSV loader and normalizer.
//!
//! Reads a delimited price file with a header row and produces a [`Dataset`]:
//! - header names are trimmed and matched case-insensitively
//! - the date column is parsed with a fixed day-month-year format
//! - records are stable-sorted ascending by date
//! - year and month are derived per record
//!
//! The default policy fails the whole load on the first malformed row.
//! [`MalformedRows::Skip`] drops such rows instead and counts them.
//!
//! Rows are read as raw bytes; only the required fields must be valid UTF-8.
//! Invalid text in one of them is a parse error on that row.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::ByteRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::dataset::Dataset;
use super::schema::{Column, HeaderMap, SchemaError};
use crate::domain::Record;

/// Date format of the `Date` column: `DD-MM-YYYY`.
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

/// What to do with a row whose date or numeric fields do not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRows {
    /// Abort the load with a parse error.
    #[default]
    Fail,
    /// Drop the row, log it, and keep loading.
    Skip,
}

/// Options controlling how a price file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub date_format: String,
    pub delimiter: u8,
    pub malformed_rows: MalformedRows,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            delimiter: b',',
            malformed_rows: MalformedRows::Fail,
        }
    }
}

/// Errors from the loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("line {line}: cannot parse {column} value '{value}': {reason}")]
    Parse {
        line: u64,
        column: Column,
        value: String,
        reason: String,
    },
}

impl LoadError {
    /// True for row-level date/numeric parse failures.
    pub fn is_parse(&self) -> bool {
        matches!(self, LoadError::Parse { .. })
    }
}

/// Load and normalize a price file from disk.
pub fn load_csv(path: &Path, opts: &LoadOptions) -> Result<Dataset, LoadError> {
    debug!(path = %path.display(), "loading price file");
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, opts)
}

/// Load and normalize price rows from any reader.
pub fn load_from_reader<R: Read>(reader: R, opts: &LoadOptions) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        debug!("price file has no header row; producing empty dataset");
        return Ok(Dataset::default());
    }
    let map = HeaderMap::resolve(headers.iter())?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.byte_records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if opts.malformed_rows == MalformedRows::Skip && is_row_shape_error(&e) => {
                warn!(error = %e, "skipping malformed row");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        match parse_row(&row, &map, line, opts) {
            Ok(record) => records.push(record),
            Err(e) if opts.malformed_rows == MalformedRows::Skip => {
                warn!(line, error = %e, "skipping malformed row");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let dataset = Dataset::new(records).with_skipped_rows(skipped);
    debug!(
        rows = dataset.len(),
        skipped,
        hash = dataset.content_hash(),
        "price file normalized"
    );
    Ok(dataset)
}

fn is_row_shape_error(e: &csv::Error) -> bool {
    matches!(e.kind(), csv::ErrorKind::UnequalLengths { .. })
}

fn parse_row(
    row: &ByteRecord,
    map: &HeaderMap,
    line: u64,
    opts: &LoadOptions,
) -> Result<Record, LoadError> {
    let field = |column: Column| text_field(row, map, column, line);

    let symbol = field(Column::Symbol)?;
    let date_raw = field(Column::Date)?;
    let date = NaiveDate::parse_from_str(date_raw, &opts.date_format).map_err(|e| {
        LoadError::Parse {
            line,
            column: Column::Date,
            value: date_raw.to_string(),
            reason: format!("expected format {}: {e}", opts.date_format),
        }
    })?;

    let price = |column: Column| parse_price(field(column)?, column, line);

    Ok(Record::new(
        symbol,
        date,
        price(Column::Open)?,
        price(Column::High)?,
        price(Column::Low)?,
        price(Column::Close)?,
        parse_volume(field(Column::Volume)?, line)?,
        price(Column::Change)?,
    ))
}

/// Trimmed text of a required field.
fn text_field<'r>(
    row: &'r ByteRecord,
    map: &HeaderMap,
    column: Column,
    line: u64,
) -> Result<&'r str, LoadError> {
    let raw = row.get(map.index(column)).unwrap_or_default();
    std::str::from_utf8(raw)
        .map(str::trim)
        .map_err(|e| LoadError::Parse {
            line,
            column,
            value: String::from_utf8_lossy(raw).into_owned(),
            reason: format!("invalid UTF-8: {e}"),
        })
}

fn parse_price(raw: &str, column: Column, line: u64) -> Result<f64, LoadError> {
    let parse_err = |reason: String| LoadError::Parse {
        line,
        column,
        value: raw.to_string(),
        reason,
    };
    let value: f64 = raw.parse().map_err(|e| parse_err(format!("{e}")))?;
    if !value.is_finite() {
        return Err(parse_err("not a finite number".into()));
    }
    Ok(value)
}

/// Volume must be a non-negative integer; integral float literals such as
/// `1200.0` are accepted.
fn parse_volume(raw: &str, line: u64) -> Result<u64, LoadError> {
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(LoadError::Parse {
            line,
            column: Column::Volume,
            value: raw.to_string(),
            reason: "not a non-negative integer".into(),
        }),
    }
}
