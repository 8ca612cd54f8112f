//! CSV parsing module for reading irregularly sampled series.
//!
//! Input files carry a header row. The time and value columns are picked
//! by name, either from the command line or by auto-detection
//! (case-insensitive):
//! - `time`, `timestamp`, `t` → observation times
//! - `value`, `price`, `close`, `v` → observed values
//!
//! Times must be numeric and strictly increasing. Empty value cells are
//! read as NaN.

use crate::error::{CliError, Result};
use csv::{ReaderBuilder, StringRecord};
use irregular_ts::traits::ValidatedInput;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Header names recognised as the time column, in priority order.
pub const TIME_COLUMNS: &[&str] = &["time", "timestamp", "t"];

/// Header names recognised as the value column, in priority order.
pub const VALUE_COLUMNS: &[&str] = &["value", "price", "close", "v"];

/// A series read from CSV: matching times and values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    /// Observation times, strictly increasing.
    pub times: Vec<f64>,
    /// Observed values.
    pub values: Vec<f64>,
}

impl Series {
    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Locate a column by explicit name or by the first matching candidate.
fn find_column(
    headers: &StringRecord,
    requested: Option<&str>,
    candidates: &[&str],
    role: &str,
) -> Result<usize> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    let position = |name: &str| normalized.iter().position(|h| *h == name);

    if let Some(name) = requested {
        let wanted = normalize_header(name);
        return position(wanted.as_str()).ok_or_else(|| CliError::InvalidArgument {
            argument: format!("{role}-column"),
            reason: format!("no column named '{name}'"),
            suggestion: Some(format!("Available columns: {}", normalized.join(", "))),
        });
    }

    candidates
        .iter()
        .find_map(|&candidate| position(candidate))
        .ok_or_else(|| CliError::CsvParseError {
            message: format!(
                "no {role} column found (expected one of: {}); pass --{role}-column",
                candidates.join(", ")
            ),
            line: Some(1),
        })
}

/// Parse a numeric cell. Empty cells become NaN.
fn parse_value(value: &str, line: usize) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|_| CliError::CsvParseError {
        message: format!("cannot parse '{trimmed}' as number"),
        line: Some(line),
    })
}

fn open<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.display().to_string()),
    })?;
    Ok(BufReader::new(file))
}

/// Read a series from a CSV file.
///
/// # Errors
///
/// Returns `CliError::IoError` if the file cannot be read,
/// `CliError::InvalidArgument` if a requested column is missing and
/// `CliError::CsvParseError` for malformed rows, missing columns or
/// times that are not strictly increasing.
pub fn read_series<P: AsRef<Path>>(
    path: P,
    time_column: Option<&str>,
    value_column: Option<&str>,
) -> Result<Series> {
    read_series_from_reader(open(path)?, time_column, value_column)
}

/// Read a series from any reader.
///
/// # Errors
///
/// See [`read_series`].
pub fn read_series_from_reader<R: Read>(
    reader: R,
    time_column: Option<&str>,
    value_column: Option<&str>,
) -> Result<Series> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let time_idx = find_column(&headers, time_column, TIME_COLUMNS, "time")?;
    let value_idx = find_column(&headers, value_column, VALUE_COLUMNS, "value")?;

    let mut series = Series::default();
    for (row, record) in csv_reader.records().enumerate() {
        // +2 for the header and 1-based lines
        let line = row + 2;
        let record = record?;

        let time = parse_value(record.get(time_idx).unwrap_or(""), line)?;
        if !time.is_finite() {
            return Err(CliError::CsvParseError {
                message: "missing or non-finite time".to_string(),
                line: Some(line),
            });
        }
        series.times.push(time);
        series
            .values
            .push(parse_value(record.get(value_idx).unwrap_or(""), line)?);
    }

    check_increasing(&series.times)?;
    log::debug!(
        "read {} observations (time column {time_idx}, value column {value_idx})",
        series.len()
    );
    Ok(series)
}

fn check_increasing(times: &[f64]) -> Result<()> {
    times.validate_strictly_increasing().map_err(|err| match err {
        irregular_ts::Error::NonIncreasingTimes { index } => CliError::CsvParseError {
            message: format!(
                "time {} does not come after {}; times must be strictly increasing",
                times[index],
                times[index - 1]
            ),
            line: Some(index + 2),
        },
        other => other.into(),
    })
}

/// Read only the time column of a CSV file, for `union`.
///
/// Times must be sorted; repeats are allowed.
///
/// # Errors
///
/// As [`read_series`], except that equal consecutive times are accepted.
pub fn read_times<P: AsRef<Path>>(path: P, time_column: Option<&str>) -> Result<Vec<f64>> {
    read_times_from_reader(open(path)?, time_column)
}

/// Read only the time column from any reader.
///
/// # Errors
///
/// See [`read_times`].
pub fn read_times_from_reader<R: Read>(reader: R, time_column: Option<&str>) -> Result<Vec<f64>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let time_idx = find_column(&headers, time_column, TIME_COLUMNS, "time")?;

    let mut times: Vec<f64> = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let line = row + 2;
        let record = record?;
        let time = parse_value(record.get(time_idx).unwrap_or(""), line)?;
        if !time.is_finite() {
            return Err(CliError::CsvParseError {
                message: "missing or non-finite time".to_string(),
                line: Some(line),
            });
        }
        if times.last().is_some_and(|&previous| time < previous) {
            return Err(CliError::CsvParseError {
                message: format!("time {time} is out of order; union inputs must be sorted"),
                line: Some(line),
            });
        }
        times.push(time);
    }
    Ok(times)
}
