//! Analyzer evaluation.
//!
//! An analyzer classifies a collected artifact and resolves the
//! classification against its ordered outcome list to produce a verdict.
//!
//! ## Data Flow
//!
//! ```text
//! artifact bytes ──► Pattern ──► classification ──► resolve ──► AnalyzeResult
//!       ▲                                              ▲
//!  ArtifactStore                                   OutcomeSet
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use rust_troubleshoot::analyzers::{analyze_text, AnalyzeMeta, Outcome, OutcomeSet, TextAnalyze};
//! use rust_troubleshoot::store::{ArtifactKey, MemoryArtifactStore};
//!
//! let mut store = MemoryArtifactStore::new();
//! store.insert(ArtifactKey::new("run-ping", "run-ping.log"), "0% packet loss");
//!
//! let analyzer = TextAnalyze {
//!     meta: AnalyzeMeta::default(),
//!     collector_name: "run-ping".to_string(),
//!     file_name: "run-ping.log".to_string(),
//!     regex_pattern: r"\b0% packet loss".to_string(),
//!     outcomes: OutcomeSet::from(vec![Outcome::pass("reachable"), Outcome::fail("unreachable")]),
//! };
//!
//! let result = analyze_text(&analyzer, &store).unwrap();
//! assert!(result.is_pass());
//! ```

/// Analyzer catalog, shared metadata and parallel batch evaluation
pub mod analyzer;

/// Outcome model and the outcome resolver
pub mod outcome;

/// Content pattern matching
pub mod pattern;

/// Batch summaries and JSON reports
pub mod summary;

/// Regex text analyzer
pub mod text;

pub use analyzer::{Analyze, AnalyzeMeta, AnalysisEngine, Analyzer, AnalyzerOutcome};
pub use outcome::{resolve, Classification, Outcome, OutcomeKind, OutcomeSet, SingleOutcome};
pub use pattern::{classify, Pattern};
pub use summary::{create_analysis_summary, AnalysisSummary};
pub use text::{analyze_text, TextAnalyze};
