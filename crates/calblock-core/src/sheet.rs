//! Schedule ingestion.
//!
//! Reads a tabular schedule file (`.xlsx` or `.csv`) into an ordered sequence
//! of header-keyed [`RawRow`]s. Decoders normalize their native cells into
//! [`CellValue`] first; the header and row logic is pure over that shape.
//!
//! Failure policy:
//! - a missing required column fails the whole run before any data row is read
//! - a row with an empty `date` cell is a blank separator and is skipped
//! - a row with an unreadable cell is logged and skipped, parsing continues

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Datelike, NaiveDateTime, NaiveTime};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cell::CellValue;
use crate::record::RawRow;

/// Columns every schedule must carry, by canonical (lowercased) name.
pub const REQUIRED_COLUMNS: &[&str] = &["date", "start time", "end time", "title"];

/// Why a schedule could not be read at all.
///
/// Every variant here is fatal to the run; row-level problems are absorbed
/// inside the parser instead.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The schedule file does not exist.
    #[error("schedule file not found: {0}")]
    FileNotFound(String),

    /// The workbook could not be opened or its sheet could not be read.
    #[error("failed to read workbook: {0}")]
    Workbook(String),

    /// The csv file could not be read.
    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension is not a supported schedule format.
    #[error("unsupported schedule format `{0}` (expected .xlsx or .csv)")]
    UnsupportedFormat(String),

    /// One or more required columns are missing from the header row.
    #[error("missing required column(s): {}", .0.join(", "))]
    Schema(Vec<String>),

    /// The schedule has no header row at all.
    #[error("schedule has no header row")]
    EmptySheet,
}

/// Reads a schedule file into ordered raw rows.
///
/// Dispatches on the file extension: `.xlsx`/`.xlsm` are decoded with
/// calamine (first worksheet), `.csv` with the csv reader.
pub fn parse_schedule(path: &Path) -> Result<Vec<RawRow>, ParseError> {
    if !path.exists() {
        return Err(ParseError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    let rows = match extension.as_str() {
        "xlsx" | "xlsm" => decode_workbook(path)?,
        "csv" => decode_csv(path)?,
        other => return Err(ParseError::UnsupportedFormat(other.to_string())),
    };

    let records = rows_to_records(&rows)?;
    info!("parsed {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Converts decoded cell rows into raw records, header row first.
///
/// Exposed for the decoders' shared use and for tests; [`parse_schedule`] is
/// the entry point for callers.
pub fn rows_to_records(rows: &[Vec<CellValue>]) -> Result<Vec<RawRow>, ParseError> {
    let Some(header_row) = rows.first() else {
        return Err(ParseError::EmptySheet);
    };

    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| cell.to_text().map(|text| text.to_lowercase()))
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !headers.iter().flatten().any(|h| h.as_str() == *required))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::Schema(missing));
    }

    let mut records = Vec::new();
    for (index, row) in rows.iter().enumerate().skip(1) {
        let row_number = index + 1;

        if let Some(CellValue::Error(reason)) =
            row.iter().find(|cell| matches!(cell, CellValue::Error(_)))
        {
            warn!("row {}: unreadable cell ({}), skipping", row_number, reason);
            continue;
        }

        let mut record = RawRow::new(row_number);
        for (column, cell) in row.iter().enumerate() {
            let Some(Some(header)) = headers.get(column) else {
                continue;
            };
            if let Some(text) = cell.to_text() {
                record.set_field(header, text);
            }
        }

        // Blank separator row.
        if record.date.is_none() {
            debug!("row {}: empty date cell, skipping", row_number);
            continue;
        }

        records.push(record);
    }

    Ok(records)
}

fn decode_workbook(path: &Path) -> Result<Vec<Vec<CellValue>>, ParseError> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| ParseError::Workbook(e.to_string()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ParseError::EmptySheet)?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| ParseError::Workbook(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn decode_csv(path: &Path) -> Result<Vec<Vec<CellValue>>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(CellValue::from).collect());
    }
    Ok(rows)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::Text(render_datetime(ndt)),
            None => CellValue::Error("unrepresentable datetime".to_string()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// Renders a date-formatted workbook cell as the text the validator expects.
///
/// Excel stores times of day as day-fractions anchored at its 1900 epoch, so
/// epoch-era datetimes are times, midnight-anchored ones are dates.
fn render_datetime(value: NaiveDateTime) -> String {
    if value.date().year() <= 1900 {
        value.format("%H:%M").to_string()
    } else if value.time() == NaiveTime::MIN {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M").to_string()
    }
}
