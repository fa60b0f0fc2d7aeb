//! CLI command definitions and argument parsing.

use certa_domain::Answer;
use certa_engine::ReasoningMode;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Certa - Backward-chaining rule engine with certainty factors.
#[derive(Debug, Parser)]
#[command(name = "certa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CERTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// Reasoning mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Answers are certain
    Deductive,
    /// Answers carry a confidence weight
    #[value(alias = "probabilistic")]
    Approximate,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the goals a knowledge base can prove
    Goals(KbArgs),

    /// Validate a knowledge base and report what it contains
    Check(KbArgs),

    /// Prove a goal non-interactively
    Prove(ProveArgs),

    /// Start an interactive proof session
    Repl(ReplArgs),
}

/// Arguments for commands that only need a knowledge base.
#[derive(Debug, Parser)]
pub struct KbArgs {
    /// Knowledge base JSON file
    pub kb: PathBuf,
}

/// Arguments for the prove command.
#[derive(Debug, Parser)]
pub struct ProveArgs {
    /// Knowledge base JSON file
    pub kb: PathBuf,

    /// Goal to prove
    #[arg(short, long)]
    pub goal: String,

    /// Reasoning mode (overrides the config file)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Pre-supplied answer (format: fact=value or fact=value@cf)
    #[arg(short, long = "answer", value_parser = parse_answer)]
    pub answers: Vec<AnswerArg>,

    /// Print the full inference log
    #[arg(long)]
    pub trace: bool,
}

/// Arguments for the repl command.
#[derive(Debug, Parser)]
pub struct ReplArgs {
    /// Knowledge base JSON file
    pub kb: PathBuf,

    /// Reasoning mode (overrides the config file)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// An answer given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerArg {
    /// Fact being answered
    pub fact: String,
    /// Value and optional weight
    pub answer: Answer,
}

/// Parse `fact=value` or `fact=value@cf`.
///
/// A trailing `@...` is only taken as a weight when it is a number, so values
/// containing `@` still work.
pub fn parse_answer(s: &str) -> std::result::Result<AnswerArg, String> {
    let (fact, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected fact=value, got '{}'", s))?;
    let fact = fact.trim();
    if fact.is_empty() {
        return Err(format!("missing fact name in '{}'", s));
    }

    let answer = match value.rsplit_once('@') {
        Some((raw, weight)) => match weight.trim().parse::<f64>() {
            Ok(cf) => Answer::new(raw).with_weight(parse_weight(cf)?),
            Err(_) => Answer::new(value),
        },
        None => Answer::new(value),
    };

    Ok(AnswerArg {
        fact: fact.to_string(),
        answer,
    })
}

/// Accept a weight only inside [0, 1].
pub fn parse_weight(cf: f64) -> std::result::Result<f64, String> {
    if certa_domain::certainty::is_valid(cf) {
        Ok(cf)
    } else {
        Err(format!("confidence must be between 0.0 and 1.0, got {}", cf))
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<ModeArg> for ReasoningMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Deductive => ReasoningMode::Deductive,
            ModeArg::Approximate => ReasoningMode::Approximate,
        }
    }
}
