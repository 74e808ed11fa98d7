use serde::{Deserialize, Serialize};

use crate::analyzers::{Outcome, OutcomeKind};

/// Verdict produced by one analyzer evaluation.
///
/// Exactly one of pass/warn/fail holds, selected by `kind`. Values are built
/// once by the resolver and never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    kind: OutcomeKind,
    #[serde(default)]
    title: String,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
}

impl AnalyzeResult {
    pub fn new(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: String::new(),
            message: message.into(),
            uri: None,
        }
    }

    /// Build the result for a selected outcome, carrying its message and URI
    pub fn from_outcome(outcome: &Outcome) -> Self {
        let detail = outcome.detail();
        Self {
            kind: outcome.kind(),
            title: String::new(),
            message: detail.message.clone(),
            uri: detail.uri.clone(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    pub fn is_pass(&self) -> bool {
        self.kind == OutcomeKind::Pass
    }

    pub fn is_warn(&self) -> bool {
        self.kind == OutcomeKind::Warn
    }

    pub fn is_fail(&self) -> bool {
        self.kind == OutcomeKind::Fail
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}
