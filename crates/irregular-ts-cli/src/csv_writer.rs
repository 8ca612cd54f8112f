//! CSV output module for writing operator results.
//!
//! Series operators write two columns, `time` and the operator label, with
//! one row per input observation. NaN outputs are written as empty cells.
//! `union` writes a single `time` column.

use crate::error::{CliError, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Output destination: either stdout or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDest {
    /// Write to stdout.
    Stdout,
    /// Write to a file at the given path.
    File(String),
}

impl OutputDest {
    /// Destination for an optional `-o/--output` argument.
    #[must_use]
    pub fn from_arg(path: Option<&str>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_string()))
    }

    /// Create a writer for this output destination.
    ///
    /// # Errors
    ///
    /// Returns `CliError::IoError` if the output file cannot be created.
    pub fn writer(&self) -> Result<Box<dyn Write>> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout().lock())),
            Self::File(path) => {
                let file = File::create(path).map_err(|e| CliError::IoError {
                    source: e,
                    path: Some(path.clone()),
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }
}

#[derive(Serialize)]
struct OutputRow {
    time: f64,
    value: Option<f64>,
}

#[derive(Serialize)]
struct TimeRow {
    time: f64,
}

/// Write one operator output aligned to its input times.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if `times` and `output` differ in
/// length, or an I/O or CSV error if writing fails.
pub fn write_series<W: Write>(
    writer: W,
    times: &[f64],
    output: &[f64],
    header: &str,
) -> Result<()> {
    if times.len() != output.len() {
        return Err(CliError::InvalidArgument {
            argument: "output".to_string(),
            reason: format!(
                "{} output values for {} times",
                output.len(),
                times.len()
            ),
            suggestion: None,
        });
    }

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(["time", header])?;
    for (&time, &value) in times.iter().zip(output) {
        csv_writer.serialize(OutputRow {
            time,
            value: (!value.is_nan()).then_some(value),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a single `time` column.
///
/// # Errors
///
/// Returns an I/O or CSV error if writing fails.
pub fn write_times<W: Write>(writer: W, times: &[f64]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for &time in times {
        csv_writer.serialize(TimeRow { time })?;
    }
    // An empty union still gets its header
    if times.is_empty() {
        csv_writer.write_record(["time"])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write an operator output to the given destination.
///
/// # Errors
///
/// See [`OutputDest::writer`] and [`write_series`].
pub fn write_series_to(
    dest: &OutputDest,
    times: &[f64],
    output: &[f64],
    header: &str,
) -> Result<()> {
    write_series(dest.writer()?, times, output, header)
}

/// Write a time column to the given destination.
///
/// # Errors
///
/// See [`OutputDest::writer`] and [`write_times`].
pub fn write_times_to(dest: &OutputDest, times: &[f64]) -> Result<()> {
    write_times(dest.writer()?, times)
}
