//! Integration tests for knowledge-base ingestion

use certa_domain::{FactValue, Provenance};
use certa_engine::{EngineConfig, MemoryOracle, ProofEngine};
use certa_kb::{load_from_path, load_from_str, KbError, KbSummary};
use std::io::Write;
use tempfile::NamedTempFile;

const FLU_KB: &str = r#"{
    "questions": {"symptom_fever": "Do you have fever?"},
    "facts": [{"name": "age", "value": "20", "cf": "0.95"}],
    "rules": [
        {
            "id": "R1",
            "conditions": [{"fact1": "$symptom_fever", "op": "==", "fact2": "yes"}],
            "conclusion": ["disease", "flu"],
            "cf": 0.9,
            "explanation": "Fever suggests flu"
        },
        {
            "id": "R2",
            "conditions": [{"fact1": "$age", "op": ">=", "fact2": 18}],
            "conclusion": ["status", "adult"],
            "explanation": "Age of majority reached"
        }
    ],
    "metadata": {"author": "ignored"}
}"#;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FLU_KB.as_bytes()).unwrap();

    let kb = load_from_path(file.path()).unwrap();
    assert_eq!(kb.questions.len(), 1);
    assert_eq!(kb.facts[0].cf, 0.95);
    assert_eq!(kb.facts[0].explanation, "Given");
    assert_eq!(kb.rules[1].cf, 1.0);
    assert_eq!(
        kb.possible_goals().into_iter().collect::<Vec<_>>(),
        vec!["disease", "status"]
    );
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_path(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, KbError::Io(_)));
}

#[test]
fn test_invalid_rule_fails_the_whole_load() {
    let json = r#"{
        "questions": {"q": "Question?"},
        "rules": [
            {"id": "R1", "conditions": [{"fact1": "$q", "op": "==", "fact2": "yes"}], "conclusion": ["a", "b"]},
            {"id": "R2", "conditions": [{"fact1": "$q", "op": "~", "fact2": "yes"}], "conclusion": ["a", "b"]}
        ]
    }"#;

    let err = load_from_str(json).unwrap_err();
    assert!(matches!(err, KbError::InvalidOperator { .. }));
}

#[test]
fn test_loaded_kb_drives_the_engine() {
    let kb = load_from_str(FLU_KB).unwrap();
    let mut engine = ProofEngine::new(kb, EngineConfig::default());
    let mut oracle = MemoryOracle::new();

    // Numeric string value and numeric literal compare as numbers
    let status = engine.prove_goal("status", &mut oracle).unwrap();
    assert_eq!(status.as_cf(), 0.95);

    let first = engine.prove_goal("disease", &mut oracle).unwrap();
    assert!(first.is_suspended());

    oracle.submit_value("symptom_fever", "yes");
    let second = engine.prove_goal("disease", &mut oracle).unwrap();
    assert_eq!(second.as_cf(), 0.9);

    let disease = engine.facts().get("disease").unwrap();
    assert_eq!(disease.value, FactValue::text("flu"));
    assert_eq!(
        disease.provenance,
        Provenance::Derived {
            rule_id: "R1".to_string()
        }
    );
}

#[test]
fn test_demo_knowledge_base_is_complete() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/medical.json");
    let kb = load_from_path(path).unwrap();
    let summary = KbSummary::of(&kb);

    assert!(summary.is_complete(), "unresolved: {:?}", summary.unresolved);
    assert!(summary.goals.contains("disease"));
    assert!(summary.goals.contains("treatment"));
}
