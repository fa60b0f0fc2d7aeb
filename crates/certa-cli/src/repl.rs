//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{parse_weight, ReplArgs};
use crate::commands::load_kb;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use certa_domain::Answer;
use certa_engine::{MemoryOracle, PendingQuestion, ReasoningMode, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

type ReplSession = Session<MemoryOracle>;

/// Run the interactive REPL.
pub fn run_repl(args: ReplArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let kb = load_kb(&args.kb)?;
    let mut engine_config = config.engine.clone();
    if let Some(mode) = args.mode {
        engine_config.reasoning = mode.into();
    }
    let mut session = Session::new(kb, engine_config, MemoryOracle::new())?;

    println!(
        "{}",
        formatter.info(&format!(
            "Certa REPL - session {} - Type 'help' for commands, 'exit' to quit",
            session.id()
        ))
    );
    println!();

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("certa ({})> ", session.mode());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut session, &mut editor, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Goals,
    Prove(String),
    Answer { fact: String, answer: Answer },
    Why(String),
    Facts,
    Trace,
    Stats,
    Mode(ReasoningMode),
    Restart,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "goals" => Ok(ReplCommand::Goals),
        "facts" => Ok(ReplCommand::Facts),
        "trace" | "log" => Ok(ReplCommand::Trace),
        "stats" => Ok(ReplCommand::Stats),
        "restart" => Ok(ReplCommand::Restart),
        "prove" => single_arg(&parts[1..], "prove <goal>").map(ReplCommand::Prove),
        "why" => single_arg(&parts[1..], "why <fact>").map(ReplCommand::Why),
        "answer" => parse_answer_command(&parts[1..]),
        "mode" => parse_mode_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command.
fn execute_repl_command(
    cmd: ReplCommand,
    session: &mut ReplSession,
    editor: &mut DefaultEditor,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Goals => {
            println!("{}", formatter.format_goals(&session.engine().possible_goals())?);
        }
        ReplCommand::Prove(goal) => {
            prove_interactively(&goal, session, editor, formatter)?;
        }
        ReplCommand::Answer { fact, answer } => {
            if session.engine().facts().contains(&fact) {
                println!(
                    "{}",
                    formatter.warning(&format!(
                        "'{}' is already established; the new answer applies after 'restart'",
                        fact
                    ))
                );
            }
            session.oracle_mut().submit(fact.clone(), answer);
            println!("{}", formatter.success(&format!("Recorded answer for '{}'", fact)));
        }
        ReplCommand::Why(fact) => {
            println!("{}", formatter.format_explanation(&session.engine().explain(&fact))?);
        }
        ReplCommand::Facts => {
            println!("{}", formatter.format_facts(session.engine())?);
        }
        ReplCommand::Trace => {
            println!("{}", formatter.format_trace(session.engine().trace()));
        }
        ReplCommand::Stats => {
            println!("{}", formatter.info(&session.engine().stats().summary()));
        }
        ReplCommand::Mode(mode) => {
            session.set_mode(mode);
            println!(
                "{}",
                formatter.success(&format!(
                    "Switched to {} reasoning; derived facts were reset, answers kept",
                    mode
                ))
            );
        }
        ReplCommand::Restart => {
            session.restart();
            println!(
                "{}",
                formatter.success(&format!("Session restarted ({})", session.id()))
            );
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

/// Prove a goal, prompting for each pending question until it settles.
fn prove_interactively(
    goal: &str,
    session: &mut ReplSession,
    editor: &mut DefaultEditor,
    formatter: &Formatter,
) -> Result<()> {
    loop {
        let proof = session.prove_goal(goal)?;
        let question = match proof.pending() {
            Some(question) => question.clone(),
            None => {
                println!("{}", formatter.format_proof(goal, &proof, session.engine(), false)?);
                return Ok(());
            }
        };

        match ask(&question, session.mode(), editor, formatter)? {
            Some(answer) => session.oracle_mut().submit(question.fact, answer),
            None => {
                println!("{}", formatter.pending_question(&question));
                println!(
                    "{}",
                    formatter.info("Proof paused. Use 'answer' then 'prove' to continue.")
                );
                return Ok(());
            }
        }
    }
}

/// Prompt for an answer (and a weight in approximate mode); `None` if the
/// operator backs out.
fn ask(
    question: &PendingQuestion,
    mode: ReasoningMode,
    editor: &mut DefaultEditor,
    formatter: &Formatter,
) -> Result<Option<Answer>> {
    let raw = loop {
        let Some(line) = read_line(editor, &format!("{} ", question.prompt))? else {
            return Ok(None);
        };
        if !line.trim().is_empty() {
            break line;
        }
        println!("{}", formatter.warning("An answer is required"));
    };
    let answer = Answer::new(raw.trim());

    if mode == ReasoningMode::Deductive {
        return Ok(Some(answer));
    }

    loop {
        let Some(line) = read_line(editor, "Confidence (0.0-1.0, default 1.0): ")? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(Some(answer));
        }
        match line.parse::<f64>().map_err(|e| e.to_string()).and_then(parse_weight) {
            Ok(cf) => return Ok(Some(answer.with_weight(cf))),
            Err(e) => println!("{}", formatter.warning(&e)),
        }
    }
}

fn read_line(editor: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match editor.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// Simple command parsers for REPL (minimal argument parsing)

fn single_arg(args: &[&str], usage: &str) -> Result<String> {
    match args {
        [arg] => Ok(arg.to_string()),
        _ => Err(CliError::InvalidInput(format!("Usage: {}", usage))),
    }
}

fn parse_answer_command(args: &[&str]) -> Result<ReplCommand> {
    if args.len() < 2 {
        return Err(CliError::InvalidInput(
            "Usage: answer <fact> <value> [cf]".to_string(),
        ));
    }

    let fact = args[0].to_string();
    let rest = &args[1..];

    // A trailing number after a value is the weight
    let answer = match rest.split_last() {
        Some((last, value)) if !value.is_empty() => match last.parse::<f64>() {
            Ok(cf) => Answer::new(value.join(" "))
                .with_weight(parse_weight(cf).map_err(CliError::InvalidInput)?),
            Err(_) => Answer::new(rest.join(" ")),
        },
        _ => Answer::new(rest.join(" ")),
    };

    Ok(ReplCommand::Answer { fact, answer })
}

fn parse_mode_command(args: &[&str]) -> Result<ReplCommand> {
    let name = single_arg(args, "mode <deductive|approximate>")?;
    ReasoningMode::parse(&name)
        .map(ReplCommand::Mode)
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown reasoning mode: {}", name)))
}

fn get_history_path() -> Result<PathBuf> {
    let certa_dir = Config::dir()?;
    std::fs::create_dir_all(&certa_dir)?;
    Ok(certa_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  goals                        - List provable goals");
    println!("  prove <goal>                 - Prove a goal, asking questions as needed");
    println!("  answer <fact> <value> [cf]   - Record an answer ahead of time");
    println!("    cf: confidence weight (0.0-1.0), used in approximate mode");
    println!("  why <fact>                   - Explain how a fact was established");
    println!("  facts                        - Show working memory");
    println!("  trace, log                   - Show the inference log");
    println!("  stats                        - Show session counters");
    println!("  mode <deductive|approximate> - Switch reasoning mode (resets derived facts)");
    println!("  restart                      - Start a fresh session");
    println!("  help, ?                      - Show this help");
    println!("  exit, quit, q                - Exit REPL");
    println!();
}
