//! The sample inputs and config under demos/ stay in sync with the code

use std::path::PathBuf;

use credence_common::config::read_toml_file;
use credence_fusion::{AppConfig, FusionConfig, FusionError, Verdict, VerificationInput, Verifier};

fn demo_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("demos")
        .join(name)
}

fn load_input(name: &str) -> VerificationInput {
    let text = std::fs::read_to_string(demo_path(name)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_sample_config_matches_defaults() {
    let config: AppConfig = read_toml_file(&demo_path("config.toml")).unwrap();
    assert_eq!(config.fusion, FusionConfig::default());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_demo_verdicts() {
    let verifier = Verifier::default();
    let cases = [
        ("recycled_image.json", Verdict::LikelyFalse),
        ("factcheck_false.json", Verdict::False),
        ("source_disagreement.json", Verdict::Uncertain),
        ("corroborated.json", Verdict::True),
    ];

    for (name, expected) in cases {
        let result = verifier.verify(&load_input(name)).unwrap();
        assert_eq!(result.verdict, expected, "{}", name);
    }
}

#[test]
fn test_demo_without_evidence() {
    let err = Verifier::default()
        .verify(&load_input("no_evidence.json"))
        .unwrap_err();
    assert_eq!(err, FusionError::NoEvidence);
}
