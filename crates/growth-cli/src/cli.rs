//! CLI argument definitions for the growth calculator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use growth_model::{
    AgeUnit, DatasetName, Gender, GrowthError, MeasurementType, TERM_GESTATION_WEEKS,
};

#[derive(Parser)]
#[command(
    name = "growth",
    version,
    about = "Growth z-scores from LMS reference tables",
    long_about = "Compute weight, head circumference (ofc) and height z-scores\n\
                  against the british_1990 and UK_WHO_preterm LMS references,\n\
                  for a single measurement or a whole cohort."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow individual identifiers and measurements in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory holding the `<measurement>_<dataset>.csv` reference tables
    /// (default: $GROWTH_REFERENCE_DIR, then the bundled data/ directory).
    #[arg(long = "reference-dir", value_name = "DIR", global = true)]
    pub reference_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a single measurement.
    Zscore(ZscoreArgs),

    /// Score every individual in a CSV or JSON file.
    Cohort(CohortArgs),

    /// List the loaded reference datasets.
    Datasets,
}

#[derive(Parser)]
pub struct ZscoreArgs {
    /// Measurement type.
    #[arg(long = "measure", value_parser = parse_measurement)]
    pub measure: MeasurementType,

    /// Measured value (kg for weight, cm for ofc and height).
    #[arg(long = "value", allow_negative_numbers = true)]
    pub value: f64,

    /// Gender of the individual (male or female).
    #[arg(long = "gender", value_parser = parse_gender)]
    pub gender: Gender,

    /// Age, in the unit given by --age-unit. Negative ages are before term.
    #[arg(long = "age", allow_negative_numbers = true)]
    pub age: f64,

    /// Unit of --age.
    #[arg(long = "age-unit", value_parser = parse_age_unit, default_value = "years")]
    pub age_unit: AgeUnit,

    /// Weeks of gestation at birth.
    #[arg(long = "gestation", default_value_t = TERM_GESTATION_WEEKS)]
    pub gestation: f64,

    /// Reference dataset.
    #[arg(long = "dataset", default_value = DatasetName::BRITISH_1990)]
    pub dataset: String,
}

#[derive(Parser)]
pub struct CohortArgs {
    /// Individuals as a .csv or .json file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Reference dataset.
    #[arg(long = "dataset", default_value = DatasetName::BRITISH_1990)]
    pub dataset: String,

    /// Age unit for individuals that do not give one.
    #[arg(long = "default-age-unit", value_parser = parse_age_unit, default_value = "years")]
    pub default_age_unit: AgeUnit,

    /// Write results to a file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Result format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: CohortFormatArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CohortFormatArg {
    Table,
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_measurement(value: &str) -> Result<MeasurementType, String> {
    value.parse().map_err(|error: GrowthError| error.to_string())
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    value.parse().map_err(|error: GrowthError| error.to_string())
}

fn parse_age_unit(value: &str) -> Result<AgeUnit, String> {
    value.parse().map_err(|error: GrowthError| error.to_string())
}
