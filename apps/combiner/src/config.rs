use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;

use command_combiner::combiner::{CombineOptions, COMMAND_BLOCK_TEXT_LIMIT};
use command_combiner::curve::GridSpec;
use command_combiner::layout::DEFAULT_ORIGIN;

/// Command-line arguments. Dimension and limit fall back to environment
/// variables, which may come from a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "command-combiner")]
#[command(about = "Combine commands into as few summon commands as fit in a command block")]
pub struct Cli {
    /// File to read commands from
    pub commands_file: PathBuf,

    /// File to write generated combined commands to
    pub output_file: PathBuf,

    /// Run the commands straight from the minecarts instead of writing them
    /// into command blocks
    #[arg(long)]
    pub run_once: bool,

    /// Skip summoning the support blocks (stone, redstone block, activator
    /// rail); use when they are already in place
    #[arg(long)]
    pub no_support_blocks: bool,

    /// Command block grid extents as x,y,z; -1 derives that axis from the
    /// number of commands
    #[arg(
        long,
        env = "COMBINER_DIMENSIONS",
        default_value = "8,-1,8",
        allow_hyphen_values = true
    )]
    pub dimensions: GridSpec,

    /// Maximum length of each output command
    #[arg(long, env = "COMBINER_TEXT_LIMIT", default_value_t = COMMAND_BLOCK_TEXT_LIMIT)]
    pub limit: usize,
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub commands_file: PathBuf,
    pub output_file: PathBuf,
    pub options: CombineOptions,
    pub rust_log: String,
}

impl Config {
    /// Loads `.env` (if present) and parses the process arguments.
    pub fn from_args() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        ensure!(cli.limit > 0, "--limit must be greater than zero");

        Ok(Config {
            commands_file: cli.commands_file,
            output_file: cli.output_file,
            options: CombineOptions {
                dimensions: cli.dimensions,
                run_once: cli.run_once,
                support_blocks: !cli.no_support_blocks,
                text_limit: cli.limit,
                origin: DEFAULT_ORIGIN,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
