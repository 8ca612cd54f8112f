//! CLI argument parsing module.
//!
//! The CLI follows the pattern `irregular-ts <operator> <input.csv> <tau> [options]`.
//! Every series subcommand reads one CSV with a time column and a value
//! column and writes one output column aligned to the input times.
//!
//! # Examples
//!
//! ```bash
//! # Equal-weight SMA over a 60-unit window
//! irregular-ts sma ticks.csv 60
//!
//! # Time-weighted SMA with linear interpolation, written to a file
//! irregular-ts sma ticks.csv 60 --weighting lin -o sma.csv
//!
//! # EMA seeded with 100
//! irregular-ts ema ticks.csv 30 --initial 100
//!
//! # Rolling second moment
//! irregular-ts moment ticks.csv 60 2
//!
//! # Merge two time grids, treating times within 1ms as equal
//! irregular-ts union a.csv b.csv --tolerance 0.001
//! ```

use clap::{Parser, Subcommand};
use irregular_ts::Weighting;

/// irregular-ts: rolling-window operators for unevenly-spaced time series
#[derive(Parser, Debug)]
#[command(name = "irregular-ts")]
#[command(author, version, about = "Rolling-window operators for unevenly-spaced time series")]
#[command(long_about = "irregular-ts computes moving averages, EMAs, moments, \
    extrema, medians, quantiles and ranks over time-based windows of irregularly \
    sampled data. Input is read from CSV files and output is written to a file \
    or stdout.")]
pub struct Args {
    /// The operator to compute
    #[command(subcommand)]
    pub command: Command,
}

/// Arguments shared by every single-series operator.
#[derive(clap::Args, Debug, Clone)]
pub struct SeriesArgs {
    /// Input CSV file
    pub input: String,

    /// Window width in the units of the time column
    #[arg(allow_negative_numbers = true)]
    pub tau: f64,

    /// Output CSV file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Column holding observation times (auto-detected if not specified)
    #[arg(long)]
    pub time_column: Option<String>,

    /// Column holding observed values (auto-detected if not specified)
    #[arg(long)]
    pub value_column: Option<String>,
}

/// Available operator commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Simple moving average
    #[command(about = "Simple moving average (SMA)")]
    Sma {
        #[command(flatten)]
        series: SeriesArgs,

        /// How observations are weighted: eq, last or lin
        #[arg(short, long, default_value_t = Weighting::Eq)]
        weighting: Weighting,

        /// Recompute the equal-weight sum from scratch every N observations
        #[arg(long)]
        refresh: Option<usize>,
    },

    /// Exponential moving average
    #[command(about = "Exponential moving average (EMA)")]
    Ema {
        #[command(flatten)]
        series: SeriesArgs,

        /// How observations are weighted: eq, last or lin
        #[arg(short, long, default_value_t = Weighting::Eq)]
        weighting: Weighting,

        /// Seed value (defaults to the first observation)
        #[arg(long, allow_negative_numbers = true)]
        initial: Option<f64>,
    },

    /// Rolling raw moment
    #[command(about = "Rolling raw moment of order m")]
    Moment {
        #[command(flatten)]
        series: SeriesArgs,

        /// Moment order
        #[arg(allow_negative_numbers = true)]
        m: f64,

        /// How observations are weighted: eq, last or lin
        #[arg(short, long, default_value_t = Weighting::Eq)]
        weighting: Weighting,
    },

    /// Rolling sum
    #[command(about = "Rolling sum of the values in each window")]
    Sum {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Rolling count
    #[command(about = "Number of observations in each window")]
    Count {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Rolling maximum
    #[command(about = "Rolling maximum")]
    Max {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Rolling minimum
    #[command(about = "Rolling minimum")]
    Min {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Rolling median
    #[command(about = "Rolling median")]
    Median {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Equal-weight rolling quantile of the current value
    #[command(about = "Quantile of each value within its window (equal weights)")]
    Quantile {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Time-weighted rolling quantile of the current value
    #[command(about = "Quantile of each value within its window (time weights)")]
    QuantileTw {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Rolling rank of the current value
    #[command(about = "Rank of each value within its window")]
    Rank {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Forward-looking simple moving average
    #[command(about = "Forward SMA over [t, t + tau]")]
    SmaFwd {
        #[command(flatten)]
        series: SeriesArgs,
    },

    /// Forward-looking exponential moving average
    #[command(about = "Forward EMA, run from the last observation backwards")]
    EmaFwd {
        #[command(flatten)]
        series: SeriesArgs,

        /// Seed value at the last observation (defaults to the last value)
        #[arg(long, allow_negative_numbers = true)]
        last: Option<f64>,
    },

    /// Sorted union of two time grids
    #[command(about = "Merge two sorted time columns, dropping near-duplicates")]
    Union {
        /// First input CSV file
        first: String,

        /// Second input CSV file
        second: String,

        /// Times closer than this to the previous kept time are dropped
        #[arg(short, long, default_value_t = 0.0)]
        tolerance: f64,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Column holding times in both inputs (auto-detected if not specified)
        #[arg(long)]
        time_column: Option<String>,
    },
}

impl Args {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Command {
    /// Label used as the output column header.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Sma {
                weighting, refresh, ..
            } => match refresh {
                Some(n) => format!("sma_{weighting}_stable{n}"),
                None => format!("sma_{weighting}"),
            },
            Self::Ema { weighting, .. } => format!("ema_{weighting}"),
            Self::Moment { m, weighting, .. } => format!("moment{m}_{weighting}"),
            Self::Sum { .. } => "sum".to_string(),
            Self::Count { .. } => "count".to_string(),
            Self::Max { .. } => "max".to_string(),
            Self::Min { .. } => "min".to_string(),
            Self::Median { .. } => "median".to_string(),
            Self::Quantile { .. } => "quantile".to_string(),
            Self::QuantileTw { .. } => "quantile_tw".to_string(),
            Self::Rank { .. } => "rank".to_string(),
            Self::SmaFwd { .. } => "sma_fwd".to_string(),
            Self::EmaFwd { .. } => "ema_fwd".to_string(),
            Self::Union { .. } => "time".to_string(),
        }
    }

    /// Shared series arguments, or `None` for `union`.
    #[must_use]
    pub fn series(&self) -> Option<&SeriesArgs> {
        match self {
            Self::Sma { series, .. }
            | Self::Ema { series, .. }
            | Self::Moment { series, .. }
            | Self::Sum { series }
            | Self::Count { series }
            | Self::Max { series }
            | Self::Min { series }
            | Self::Median { series }
            | Self::Quantile { series }
            | Self::QuantileTw { series }
            | Self::Rank { series }
            | Self::SmaFwd { series }
            | Self::EmaFwd { series, .. } => Some(series),
            Self::Union { .. } => None,
        }
    }

    /// Output file path, if specified.
    #[must_use]
    pub fn output_path(&self) -> Option<&str> {
        match self {
            Self::Union { output, .. } => output.as_deref(),
            other => other.series().and_then(|s| s.output.as_deref()),
        }
    }
}
