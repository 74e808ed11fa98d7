//! Integration tests for the regex text analyzer.
//!
//! These tests evaluate analyzers end to end against in-memory stores and
//! extracted bundle directories on disk.

use std::fs;

use anyhow::Result;
use tempfile::TempDir;

use rust_troubleshoot::analyzers::{
    analyze_text, create_analysis_summary, AnalysisEngine, AnalysisSummary, Analyze, AnalyzeMeta,
    Analyzer, Outcome, OutcomeKind, OutcomeSet, TextAnalyze,
};
use rust_troubleshoot::config::EngineConfig;
use rust_troubleshoot::errors::AnalyzeError;
use rust_troubleshoot::store::{ArtifactKey, DirectoryArtifactStore, MemoryArtifactStore};

const GROUPED_PATTERN: &str = r"([a-zA-Z0-9\-_:*\s])*succe([a-zA-Z0-9\-_:*\s!])*";

fn text_analyze(collector: &str, file: &str, pattern: &str, outcomes: Vec<Outcome>) -> TextAnalyze {
    TextAnalyze {
        meta: AnalyzeMeta::default(),
        collector_name: collector.to_string(),
        file_name: file.to_string(),
        regex_pattern: pattern.to_string(),
        outcomes: OutcomeSet::from(outcomes),
    }
}

fn pass_fail(pass: &str, fail: &str) -> Vec<Outcome> {
    vec![Outcome::pass(pass), Outcome::fail(fail)]
}

fn single_file_store(collector: &str, file: &str, content: &str) -> MemoryArtifactStore {
    let mut store = MemoryArtifactStore::new();
    store.insert(ArtifactKey::new(collector, file), content);
    store
}

/// A literal pattern found in the artifact resolves to the pass outcome
#[test]
fn test_literal_pattern_match_passes() -> Result<()> {
    let store = single_file_store("text-collector-1", "cfile-1.txt", "Yes it all succeeded");
    let analyzer = text_analyze(
        "text-collector-1",
        "cfile-1.txt",
        "succeeded",
        pass_fail("pass", "fail"),
    );

    let result = analyze_text(&analyzer, &store)?;
    assert_eq!(result.kind(), OutcomeKind::Pass);
    assert_eq!(result.message(), "pass");
    assert_eq!(result.title(), "text-collector-1");
    Ok(())
}

/// Empty content never contains a literal pattern
#[test]
fn test_empty_content_fails() -> Result<()> {
    let store = single_file_store("text-collector-2", "cfile-2.txt", "");
    let analyzer = text_analyze(
        "text-collector-2",
        "cfile-2.txt",
        "succeeded",
        pass_fail("pass", "fail"),
    );

    let result = analyze_text(&analyzer, &store)?;
    assert_eq!(result.kind(), OutcomeKind::Fail);
    assert_eq!(result.message(), "fail");
    Ok(())
}

/// An empty pattern matches any artifact content
#[test]
fn test_empty_pattern_passes() -> Result<()> {
    let store = single_file_store(
        "text-collector-3",
        "cfile-3.txt",
        "Connection to service succeeded",
    );
    let analyzer = text_analyze("text-collector-3", "cfile-3.txt", "", pass_fail("success", "fail"));

    let result = analyze_text(&analyzer, &store)?;
    assert!(result.is_pass());
    assert_eq!(result.message(), "success");
    Ok(())
}

#[test]
fn test_grouped_pattern_match_passes() -> Result<()> {
    let store = single_file_store(
        "text-collector-5",
        "cfile-5.txt",
        "Connection to service succeeded!",
    );
    let analyzer = text_analyze(
        "text-collector-5",
        "cfile-5.txt",
        GROUPED_PATTERN,
        pass_fail("success", "fail"),
    );

    assert!(analyze_text(&analyzer, &store)?.is_pass());
    Ok(())
}

#[test]
fn test_non_matching_content_fails() -> Result<()> {
    let store = single_file_store("text-collector-4", "cfile-4.txt", "A different message");
    let literal = text_analyze(
        "text-collector-4",
        "cfile-4.txt",
        "succeeded",
        pass_fail("success", "fail"),
    );
    let grouped = text_analyze(
        "text-collector-4",
        "cfile-4.txt",
        GROUPED_PATTERN,
        pass_fail("success", "fail"),
    );

    assert!(analyze_text(&literal, &store)?.is_fail());
    assert!(analyze_text(&grouped, &store)?.is_fail());
    Ok(())
}

#[test]
fn test_check_name_is_used_as_title() -> Result<()> {
    let store = single_file_store("run-ping", "run-ping.log", "0% packet loss");
    let mut analyzer = text_analyze(
        "run-ping",
        "run-ping.log",
        "0% packet loss",
        pass_fail("ok", "lossy"),
    );
    analyzer.meta.check_name = Some("Outbound ping".to_string());

    assert_eq!(analyze_text(&analyzer, &store)?.title(), "Outbound ping");
    Ok(())
}

/// The first outcome of the required kind wins even when others follow
#[test]
fn test_first_matching_outcome_wins() -> Result<()> {
    let store = single_file_store("c", "f.txt", "ready");
    let analyzer = text_analyze(
        "c",
        "f.txt",
        "ready",
        vec![
            Outcome::fail("not ready"),
            Outcome::pass("first pass"),
            Outcome::pass("second pass"),
        ],
    );

    assert_eq!(analyze_text(&analyzer, &store)?.message(), "first pass");
    Ok(())
}

#[test]
fn test_missing_outcome_kind_is_an_error() {
    let store = single_file_store("c", "f.txt", "nothing here");
    let analyzer = text_analyze("c", "f.txt", "ready", vec![Outcome::pass("ready")]);

    match analyze_text(&analyzer, &store) {
        Err(AnalyzeError::NoApplicableOutcome { required }) => {
            assert_eq!(required, OutcomeKind::Fail)
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_invalid_pattern_is_reported_before_lookup() {
    let store = MemoryArtifactStore::new();
    let analyzer = text_analyze("c", "missing.txt", "(unclosed", pass_fail("pass", "fail"));

    let err = analyze_text(&analyzer, &store).unwrap_err();
    assert!(matches!(err, AnalyzeError::PatternCompile { .. }));
    assert!(err.is_configuration_error());
}

#[test]
fn test_bundle_directory_store() -> Result<()> {
    let bundle = TempDir::new()?;
    fs::create_dir_all(bundle.path().join("run-ping"))?;
    fs::write(
        bundle.path().join("run-ping/run-ping.log"),
        "5 packets transmitted, 5 received, 0% packet loss",
    )?;
    fs::write(bundle.path().join("version.yaml"), "apiVersion: v1")?;

    let store = DirectoryArtifactStore::new(bundle.path());
    assert_eq!(
        store.keys()?,
        vec![
            ArtifactKey::new("", "version.yaml"),
            ArtifactKey::new("run-ping", "run-ping.log"),
        ]
    );

    let ping = text_analyze(
        "run-ping",
        "run-ping.log",
        r"\b0% packet loss",
        pass_fail("reachable", "unreachable"),
    );
    assert!(analyze_text(&ping, &store)?.is_pass());

    let version = text_analyze("", "version.yaml", "apiVersion", pass_fail("found", "missing"));
    assert!(analyze_text(&version, &store)?.is_pass());

    let missing = text_analyze("run-dns", "run-dns.log", "", pass_fail("found", "missing"));
    assert!(matches!(
        analyze_text(&missing, &store),
        Err(AnalyzeError::ArtifactNotFound { .. })
    ));
    Ok(())
}

/// One failing analyzer does not stop the rest of the batch
#[test]
fn test_engine_isolates_errors() -> Result<()> {
    let mut store = MemoryArtifactStore::new();
    store.insert(ArtifactKey::new("a", "a.log"), "succeeded");
    store.insert(ArtifactKey::new("b", "b.log"), "failed");

    let mut excluded = text_analyze("e", "e.log", "", pass_fail("pass", "fail"));
    excluded.meta.exclude = true;

    let analyzers: Vec<Analyzer> = vec![
        text_analyze("a", "a.log", "succeeded", pass_fail("pass", "fail")).into(),
        text_analyze("missing", "m.log", "", pass_fail("pass", "fail")).into(),
        excluded.into(),
        text_analyze("b", "b.log", "(bad", pass_fail("pass", "fail")).into(),
        text_analyze("b", "b.log", "succeeded", pass_fail("pass", "fail")).into(),
    ];

    let config = EngineConfig {
        max_parallel_analyzers: Some(2),
        ..EngineConfig::default()
    };
    let engine = AnalysisEngine::new(&config)?;
    let outcomes = engine.analyze_all(&analyzers, &store);

    let titles: Vec<&str> = outcomes.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "missing", "b", "b"]);

    assert!(outcomes[0].result.as_ref().map(|r| r.is_pass()).unwrap_or(false));
    assert!(matches!(
        outcomes[1].result,
        Err(AnalyzeError::ArtifactNotFound { .. })
    ));
    assert!(matches!(
        outcomes[2].result,
        Err(AnalyzeError::PatternCompile { .. })
    ));
    assert!(outcomes[3].result.as_ref().map(|r| r.is_fail()).unwrap_or(false));

    let summary = AnalysisSummary::from_outcomes(&outcomes);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.artifact_errors, 1);
    assert_eq!(summary.configuration_errors, 1);
    assert_eq!(summary.total(), 4);

    let report: serde_json::Value = serde_json::from_str(&create_analysis_summary(&outcomes)?)?;
    assert_eq!(report["total"], 4);
    assert_eq!(report["results"][0]["kind"], "pass");
    Ok(())
}

#[test]
fn test_analyzers_from_yaml() -> Result<()> {
    let yaml = r#"
- textAnalyze:
    checkName: Service connection
    collectorName: text-collector-3
    fileName: cfile-3.txt
    regex: succeeded
    outcomes:
      - fail:
          message: Connection failed
      - pass:
          message: Connection succeeded
          uri: https://example.com/docs/connection
"#;
    let analyzers: Vec<Analyzer> = serde_yaml::from_str(yaml)?;
    let store = single_file_store(
        "text-collector-3",
        "cfile-3.txt",
        "Connection to service succeeded",
    );

    let result = analyzers[0].analyze(&store)?;
    assert_eq!(result.title(), "Service connection");
    assert_eq!(result.message(), "Connection succeeded");
    assert_eq!(result.uri(), Some("https://example.com/docs/connection"));
    Ok(())
}
