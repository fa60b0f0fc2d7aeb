//! Certa CLI - Command-line interface for the Certa rule engine.

use anyhow::Context;
use certa_cli::commands;
use certa_cli::repl;
use certa_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Exit status when a proof is waiting for an answer
const EXIT_SUSPENDED: i32 = 2;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load or create config
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Goals(args) => {
            commands::execute_goals(args, &formatter).context("goals failed")?;
        }
        Command::Check(args) => {
            commands::execute_check(args, &formatter).context("check failed")?;
        }
        Command::Prove(args) => {
            let proof = commands::execute_prove(args, &config, &formatter)
                .context("prove failed")?;
            if proof.is_suspended() {
                return Ok(EXIT_SUSPENDED);
            }
        }
        Command::Repl(args) => {
            repl::run_repl(args, &config, &formatter).context("REPL failed")?;
        }
    }

    Ok(0)
}

/// Log to stderr; `-v` flags take precedence over `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
