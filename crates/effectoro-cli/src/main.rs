//! effectoro
//!
//! Classifies secreted oomycete proteins as effectors or non-effectors.
//!
//! ```shell
//! effectoro predict secreted.fasta --model trained_models/effectoro_rf.onnx
//! effectoro table secreted.fasta --format tsv
//! ```
use clap::Parser;
use log::{error, info};

mod cli;
mod commands;

fn main() {
    let start = std::time::Instant::now();
    let cli = cli::Cli::parse();

    if let Err(e) = simple_logger::init_with_level(cli.log_level()) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build_global()
    {
        error!("Failed to build thread pool: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = cli.execute() {
        error!("{:#}", e);
        std::process::exit(1);
    }

    info!("Elapsed time: {:.3?}", start.elapsed());
}
