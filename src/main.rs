// ABOUTME: Entry point for the nexus-retention CLI application.
// ABOUTME: Parses arguments, loads config, runs one cleanup, maps errors to exit codes.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use nexus_retention::config::{Config, resolve_policy};
use nexus_retention::error::{Result, exit_code};
use nexus_retention::output::Output;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output_mode());

    let result = run(cli, &mut output).await;

    let code = match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            output.error(&e.to_string());
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let selector = cli.selector()?;

    let cwd = env::current_dir()?;
    let config = Config::resolve(cli.config.as_deref(), &cwd)?;
    let policy = resolve_policy(cli.keep, cli.days, config.retention.as_ref())?;

    commands::clean(&config, &selector, policy, cli.dry_run, output).await
}
