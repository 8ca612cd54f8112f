//! Dispatch from parsed arguments to the irregular-ts operators.

use crate::args::{Command, SeriesArgs};
use crate::csv_parser::{read_series, read_times, Series};
use crate::csv_writer::{write_series_to, write_times_to, OutputDest};
use crate::error::{CliError, Result};
use irregular_ts::merge::sorted_union;
use irregular_ts::operators::{
    ema, ema_forward, rolling_count, rolling_max, rolling_median, rolling_min, rolling_moment,
    rolling_quantile_eq, rolling_quantile_time_weighted, rolling_rank, rolling_sum, sma,
    sma_eq_stable, sma_forward,
};
use irregular_ts::Weighting;

/// Run one command end to end: read input, compute, write output.
///
/// # Errors
///
/// Returns the first I/O, parse, argument or operator error encountered.
pub fn run(command: &Command) -> Result<()> {
    let dest = OutputDest::from_arg(command.output_path());

    if let Command::Union {
        first,
        second,
        tolerance,
        time_column,
        ..
    } = command
    {
        let a = read_times(first, time_column.as_deref())?;
        let b = read_times(second, time_column.as_deref())?;
        let merged = sorted_union(&a, &b, *tolerance)?;
        log::info!(
            "union of {} and {} times kept {}",
            a.len(),
            b.len(),
            merged.len()
        );
        return write_times_to(&dest, &merged);
    }

    let args = command.series().ok_or_else(|| CliError::InvalidArgument {
        argument: "command".to_string(),
        reason: "command takes no series input".to_string(),
        suggestion: None,
    })?;
    let series = read_series(
        &args.input,
        args.time_column.as_deref(),
        args.value_column.as_deref(),
    )?;
    log::info!("read {} observations from {}", series.len(), args.input);

    let output = compute(command, args, &series)?;
    write_series_to(&dest, &series.times, &output, &command.label())
}

/// Evaluate the operator a command names on an already-read series.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for option combinations the
/// operators do not support, or `CliError::OperatorError` if the library
/// rejects the call.
pub fn compute(command: &Command, args: &SeriesArgs, series: &Series) -> Result<Vec<f64>> {
    let (values, times, tau) = (&series.values[..], &series.times[..], args.tau);

    let output = match command {
        Command::Sma {
            weighting,
            refresh: Some(refresh),
            ..
        } => {
            if *weighting != Weighting::Eq {
                return Err(CliError::InvalidArgument {
                    argument: "refresh".to_string(),
                    reason: format!("not supported with {weighting} weighting"),
                    suggestion: Some("Drop --refresh or use --weighting eq".to_string()),
                });
            }
            sma_eq_stable(values, times, tau, *refresh)?
        }
        Command::Sma {
            weighting,
            refresh: None,
            ..
        } => sma(values, times, tau, *weighting)?,
        Command::Ema {
            weighting, initial, ..
        } => {
            let initial = initial.or_else(|| values.first().copied()).unwrap_or(f64::NAN);
            ema(values, times, tau, initial, *weighting)?
        }
        Command::Moment { m, weighting, .. } => rolling_moment(values, times, tau, *m, *weighting)?,
        Command::Sum { .. } => rolling_sum(values, times, tau)?,
        Command::Count { .. } => rolling_count(values, times, tau)?,
        Command::Max { .. } => rolling_max(values, times, tau)?,
        Command::Min { .. } => rolling_min(values, times, tau)?,
        Command::Median { .. } => rolling_median(values, times, tau)?,
        Command::Quantile { .. } => rolling_quantile_eq(values, times, tau)?,
        Command::QuantileTw { .. } => rolling_quantile_time_weighted(values, times, tau)?,
        Command::Rank { .. } => rolling_rank(values, times, tau)?,
        Command::SmaFwd { .. } => sma_forward(values, times, tau)?,
        Command::EmaFwd { last, .. } => {
            let last = last.or_else(|| values.last().copied()).unwrap_or(f64::NAN);
            ema_forward(values, times, tau, last)?
        }
        Command::Union { .. } => {
            return Err(CliError::InvalidArgument {
                argument: "command".to_string(),
                reason: "union does not operate on a single series".to_string(),
                suggestion: None,
            })
        }
    };

    log::debug!("{} produced {} outputs", command.label(), output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;

    fn series() -> Series {
        Series {
            times: vec![0.0, 1.0, 2.0, 3.0, 4.0],
            values: vec![5.0, 3.0, 1.0, 4.0, 2.0],
        }
    }

    fn compute_argv(argv: &[&str]) -> Result<Vec<f64>> {
        let args = Args::try_parse_from(argv).unwrap();
        let series_args = args.command.series().unwrap().clone();
        compute(&args.command, &series_args, &series())
    }

    #[test]
    fn test_compute_median() {
        let output = compute_argv(&["irregular-ts", "median", "in.csv", "2.5"]).unwrap();
        assert_eq!(output, vec![5.0, 4.0, 3.0, 3.0, 2.0]);
    }

    #[test]
    fn test_compute_count() {
        let output = compute_argv(&["irregular-ts", "count", "in.csv", "2.5"]).unwrap();
        assert_eq!(output, vec![1.0, 2.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_compute_ema_defaults_to_first_value() {
        let output = compute_argv(&["irregular-ts", "ema", "in.csv", "1"]).unwrap();
        assert_eq!(output[0], 5.0);

        let seeded =
            compute_argv(&["irregular-ts", "ema", "in.csv", "1", "--initial", "0"]).unwrap();
        assert_eq!(seeded[0], 0.0);
    }

    #[test]
    fn test_compute_ema_fwd_defaults_to_last_value() {
        let output = compute_argv(&["irregular-ts", "ema-fwd", "in.csv", "1"]).unwrap();
        assert_eq!(output[4], 2.0);
    }

    #[test]
    fn test_compute_refresh_requires_eq_weighting() {
        let result = compute_argv(&[
            "irregular-ts",
            "sma",
            "in.csv",
            "2",
            "--weighting",
            "lin",
            "--refresh",
            "3",
        ]);
        assert!(matches!(result, Err(CliError::InvalidArgument { .. })));

        let stable =
            compute_argv(&["irregular-ts", "sma", "in.csv", "2", "--refresh", "3"]).unwrap();
        let plain = compute_argv(&["irregular-ts", "sma", "in.csv", "2"]).unwrap();
        for (a, b) in stable.iter().zip(&plain) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_compute_reports_operator_errors() {
        let result = compute_argv(&["irregular-ts", "sum", "in.csv", "0"]);
        assert!(matches!(
            result,
            Err(CliError::OperatorError {
                source: irregular_ts::Error::InvalidWindow { .. }
            })
        ));

        let result = compute_argv(&["irregular-ts", "moment", "in.csv", "1", "-1"]);
        assert!(matches!(result, Err(CliError::OperatorError { .. })));
    }
}
