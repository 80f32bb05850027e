mod config;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use command_combiner::{combine, input};

use crate::config::Config;

fn main() -> Result<()> {
    let config = Config::from_args()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting command-combiner v{}", env!("CARGO_PKG_VERSION"));

    if !config.commands_file.exists() {
        warn!(
            "Commands file {} does not exist; nothing to do",
            config.commands_file.display()
        );
        return Ok(());
    }

    let commands = input::read_commands(&config.commands_file).with_context(|| {
        format!(
            "Failed to read commands from {}",
            config.commands_file.display()
        )
    })?;
    info!(
        "Read {} commands from {}",
        commands.len(),
        config.commands_file.display()
    );

    let combined = combine(&commands, &config.options)
        .context("Failed to lay out commands")?
        .collect::<command_combiner::Result<Vec<String>>>()
        .context("Failed to pack commands")?;

    let written = input::write_output(&config.output_file, &combined).with_context(|| {
        format!(
            "Failed to write output to {}",
            config.output_file.display()
        )
    })?;
    info!(
        "Wrote {written} combined commands to {}",
        config.output_file.display()
    );

    Ok(())
}
