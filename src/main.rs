use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use taskgraph::dataset::DEFAULT_SEED;

mod commands;

#[derive(Parser)]
#[command(name = "tg", version, about = "Task-dependency graph analysis: SCCs, topological order, critical paths")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the standard synthetic datasets
    Generate {
        /// Output directory for the dataset files
        #[arg(long, default_value = "data")]
        dir: PathBuf,
        /// RNG seed (fixed default keeps datasets reproducible)
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Analyze dataset files: SCCs, ordering, critical path
    Analyze {
        /// Emit a JSON report per file instead of human-readable output
        #[arg(long)]
        json: bool,
        /// Dataset files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate { dir, seed } => commands::generate::run(&dir, seed),
        Command::Analyze { json, files } => commands::analyze::run(&files, json),
    }
}
