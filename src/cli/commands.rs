use crate::core::aggregator::aggregate;
use crate::domain::models::{AggregateConfig, DEFAULT_OUTPUT_FILE, DEFAULT_SPECIAL_EXCLUDE};
use crate::infra::logger::setup_logger;
use crate::infra::output::print_completion;
use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tree-aggregate")]
#[command(about = "Aggregate project files into a single text file", long_about = None)]
pub struct Cli {
    /// Name of the output text file.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Special file to exclude from aggregation.
    #[arg(short, long, default_value = DEFAULT_SPECIAL_EXCLUDE)]
    pub special: String,

    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;

    let root = std::env::current_dir().context("Failed to read current directory")?;
    info!("Starting aggregation");
    debug!(
        "Command parameters: root={}, output={}, special={}",
        root.display(),
        cli.output.display(),
        cli.special
    );

    let config = AggregateConfig::new(root, cli.output, cli.special);
    aggregate(&config)?;

    print_completion(&config.output_path)
}
