//! Prove command implementation.

use crate::cli::ProveArgs;
use crate::commands::load_kb;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use certa_engine::{MemoryOracle, Proof, Session};

/// Execute the prove command.
///
/// Answers given with `--answer` are recorded before the first pass. A proof
/// that still needs input is reported, not prompted for.
pub fn execute_prove(args: ProveArgs, config: &Config, formatter: &Formatter) -> Result<Proof> {
    let kb = load_kb(&args.kb)?;

    let mut engine_config = config.engine.clone();
    if let Some(mode) = args.mode {
        engine_config.reasoning = mode.into();
    }

    let mut oracle = MemoryOracle::new();
    for arg in args.answers {
        oracle.submit(arg.fact, arg.answer);
    }

    let mut session = Session::new(kb, engine_config, oracle)?;
    if !session.engine().possible_goals().contains(&args.goal)
        && session.engine().question(&args.goal).is_none()
    {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "'{}' is neither a rule conclusion nor a question",
                args.goal
            ))
        );
    }

    let proof = session.prove_goal(&args.goal)?;
    println!(
        "{}",
        formatter.format_proof(&args.goal, &proof, session.engine(), args.trace)?
    );

    if let Some(question) = proof.pending() {
        eprintln!(
            "{}",
            formatter.info(&format!(
                "Re-run with --answer {}=<value> to continue",
                question.fact
            ))
        );
    }
    tracing::debug!("{}", session.engine().stats().summary());

    Ok(proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parse_answer;
    use crate::config::OutputFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const KB: &str = r#"{
        "questions": {"symptom_fever": "Do you have fever?"},
        "rules": [{
            "id": "R1",
            "conditions": [{"fact1": "$symptom_fever", "op": "==", "fact2": "yes"}],
            "conclusion": ["disease", "flu"],
            "cf": 0.9
        }]
    }"#;

    fn kb_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(KB.as_bytes()).unwrap();
        file
    }

    fn args(file: &NamedTempFile, answers: &[&str]) -> ProveArgs {
        ProveArgs {
            kb: file.path().to_path_buf(),
            goal: "disease".to_string(),
            mode: None,
            answers: answers.iter().map(|a| parse_answer(a).unwrap()).collect(),
            trace: false,
        }
    }

    #[test]
    fn test_prove_suspends_without_answers() {
        let file = kb_file();
        let formatter = Formatter::new(OutputFormat::Json, false);
        let proof = execute_prove(args(&file, &[]), &Config::default(), &formatter).unwrap();
        assert!(proof.is_suspended());
    }

    #[test]
    fn test_prove_with_answers() {
        let file = kb_file();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let proof = execute_prove(
            args(&file, &["symptom_fever=yes"]),
            &Config::default(),
            &formatter,
        )
        .unwrap();
        assert_eq!(proof.as_cf(), 0.9);
    }

    #[test]
    fn test_missing_kb_is_an_error() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let args = ProveArgs {
            kb: "/nonexistent/kb.json".into(),
            goal: "disease".to_string(),
            mode: None,
            answers: Vec::new(),
            trace: false,
        };
        assert!(execute_prove(args, &Config::default(), &formatter).is_err());
    }
}
