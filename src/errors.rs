//! Typed failure domains for artifact lookup and analyzer evaluation.
//!
//! Infrastructure problems (a missing or unreadable artifact) and rule
//! configuration problems (a bad pattern, a missing outcome) are kept apart
//! so a report can show them separately from diagnosed conditions. Template
//! conversion errors cover user-supplied manifests that do not fit the
//! resource they are submitted as.

use std::io;

use thiserror::Error;

use crate::analyzers::OutcomeKind;
use crate::store::ArtifactKey;

/// Error returned by an [`ArtifactStore`](crate::store::ArtifactStore) lookup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("artifact not found: {0}")]
    NotFound(ArtifactKey),
    #[error("invalid artifact key '{key}': {reason}")]
    InvalidKey { key: ArtifactKey, reason: String },
    #[error("failed to read artifact '{key}': {source}")]
    Io {
        key: ArtifactKey,
        #[source]
        source: io::Error,
    },
}

/// Error returned by a single analyzer evaluation.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("artifact not found: {key}")]
    ArtifactNotFound { key: ArtifactKey },
    #[error("invalid pattern '{pattern}': {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("no {required} outcome is defined for this analyzer")]
    NoApplicableOutcome { required: OutcomeKind },
    #[error(transparent)]
    Store(StoreError),
}

/// Error converting a user-supplied template into a typed resource.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {field} is '{found}', expected '{expected}'")]
    TypeMismatch {
        field: &'static str,
        expected: String,
        found: String,
    },
    #[error("template field '{0}' is not part of the resource schema")]
    UnknownField(String),
    #[error("template field '{field}' is malformed: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalyzeError {
    /// True when the error comes from the rule definition rather than the
    /// collected artifacts.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AnalyzeError::PatternCompile { .. } | AnalyzeError::NoApplicableOutcome { .. }
        )
    }
}

impl From<StoreError> for AnalyzeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => AnalyzeError::ArtifactNotFound { key },
            other => AnalyzeError::Store(other),
        }
    }
}
