use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::json;

use crate::analyzers::analyzer::AnalyzerOutcome;

/// Counts of verdicts and errors across one batch of analyzers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
    /// Analyzers whose artifact could not be found or read
    pub artifact_errors: usize,
    /// Analyzers with a malformed pattern or a missing outcome
    pub configuration_errors: usize,
}

impl AnalysisSummary {
    pub fn from_outcomes(outcomes: &[AnalyzerOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match &outcome.result {
                Ok(result) if result.is_pass() => summary.passed += 1,
                Ok(result) if result.is_warn() => summary.warned += 1,
                Ok(_) => summary.failed += 1,
                Err(err) if err.is_configuration_error() => summary.configuration_errors += 1,
                Err(_) => summary.artifact_errors += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.passed + self.warned + self.failed + self.errored()
    }

    pub fn errored(&self) -> usize {
        self.artifact_errors + self.configuration_errors
    }

    /// Log the counts, and each analyzer error at warn level
    pub fn log_summary(&self, outcomes: &[AnalyzerOutcome]) {
        info!(
            "Analysis complete: {} passed, {} warned, {} failed, {} errored",
            self.passed,
            self.warned,
            self.failed,
            self.errored()
        );

        for outcome in outcomes {
            if let Err(err) = &outcome.result {
                warn!("  • {}: {}", outcome.title, err);
            }
        }
    }
}

/// Render a JSON report of a batch of analyzer outcomes.
///
/// # Example Output
///
/// ```json
/// {
///   "total": 2,
///   "passed": 1,
///   "warned": 0,
///   "failed": 0,
///   "artifact_errors": 1,
///   "configuration_errors": 0,
///   "results": [
///     {"title": "run-ping", "kind": "pass", "message": "Outbound traffic works"},
///     {"title": "logs", "error": "artifact not found: logs/app.log", "configuration_error": false}
///   ]
/// }
/// ```
pub fn create_analysis_summary(outcomes: &[AnalyzerOutcome]) -> Result<String> {
    let summary = AnalysisSummary::from_outcomes(outcomes);

    let results: Vec<_> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(result) => json!({
                "title": outcome.title,
                "kind": result.kind(),
                "message": result.message(),
                "uri": result.uri(),
            }),
            Err(err) => json!({
                "title": outcome.title,
                "error": err.to_string(),
                "configuration_error": err.is_configuration_error(),
            }),
        })
        .collect();

    let report = json!({
        "total": summary.total(),
        "passed": summary.passed,
        "warned": summary.warned,
        "failed": summary.failed,
        "artifact_errors": summary.artifact_errors,
        "configuration_errors": summary.configuration_errors,
        "results": results,
    });

    serde_json::to_string_pretty(&report).context("Failed to serialize analysis summary")
}
