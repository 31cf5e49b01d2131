use super::commands;
use clap::{Args, Parser, Subcommand, ValueEnum};
use effectoro_core::{BATCH_PRECISION, INTERACTIVE_PRECISION, MAX_PRECISION};
use effectoro_models::DEFAULT_MODEL_PATH;
use log::Level;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "effectoro", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Number of threads used for feature extraction
    #[arg(short = 't', long, global = true, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a FASTA file and write the classification table and predicted effectors
    Predict(PredictArgs),
    /// Classify a FASTA file and print the classification table to stdout
    Table(TableArgs),
}

#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Trained classifier (.onnx or .json forest)
    #[arg(short, long, env = "EFFECTORO_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Secreted protein FASTA file
    pub input: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Directory for the output files
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Decimal places kept in probabilities
    #[arg(
        long,
        default_value_t = BATCH_PRECISION,
        value_parser = clap::value_parser!(u32).range(0..=MAX_PRECISION as i64)
    )]
    pub precision: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Tsv,
}

#[derive(Args, Debug)]
pub struct TableArgs {
    /// Secreted protein FASTA file
    pub input: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    #[arg(short, long, value_enum, default_value_t = TableFormat::Json)]
    pub format: TableFormat,

    /// Decimal places kept in probabilities
    #[arg(
        long,
        default_value_t = INTERACTIVE_PRECISION,
        value_parser = clap::value_parser!(u32).range(0..=MAX_PRECISION as i64)
    )]
    pub precision: u32,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::Debug
        } else {
            Level::Info
        }
    }

    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Predict(args) => commands::predict::execute(args),
            Commands::Table(args) => commands::table::execute(args),
        }
    }
}
