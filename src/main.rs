//! Taskforge CLI entry point.

use anyhow::Result;
use clap::Parser;

use taskforge::cli::{self, commands, Cli, Commands};
use taskforge::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        cli::handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli::load_config(cli.config.as_deref())?;
    let _logger = LoggerImpl::init(&config.logging)?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &config, cli.json).await,
        Commands::Decompose(args) => commands::decompose::execute(args, cli.json),
        Commands::Experience(args) => commands::experience::execute(args, cli.json),
        Commands::Duration(args) => commands::duration::execute(args, cli.json),
    }
}
