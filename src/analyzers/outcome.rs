use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AnalyzeError;
use crate::models::AnalyzeResult;

/// The three verdict kinds an outcome or a result can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Pass,
    Warn,
    Fail,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Pass => write!(f, "pass"),
            OutcomeKind::Warn => write!(f, "warn"),
            OutcomeKind::Fail => write!(f, "fail"),
        }
    }
}

/// A signal produced by an analyzer that selects which outcome kind applies.
///
/// Boolean analyzers map `true` to pass and `false` to fail. Analyzers with
/// richer signals (thresholds, comparisons) implement this for their own type
/// and may select warn.
pub trait Classification {
    fn outcome_kind(&self) -> OutcomeKind;
}

impl Classification for bool {
    fn outcome_kind(&self) -> OutcomeKind {
        if *self {
            OutcomeKind::Pass
        } else {
            OutcomeKind::Fail
        }
    }
}

impl Classification for OutcomeKind {
    fn outcome_kind(&self) -> OutcomeKind {
        *self
    }
}

/// Message and optional link attached to one outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// One candidate verdict in an analyzer's outcome list.
///
/// Serialized as a single-key map (`pass:`, `warn:` or `fail:`), so a
/// definition naming zero or several kinds is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOutcome", into = "RawOutcome")]
pub enum Outcome {
    Pass(SingleOutcome),
    Warn(SingleOutcome),
    Fail(SingleOutcome),
}

/// Wire form of [`Outcome`]: one optional slot per kind
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pass: Option<SingleOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    warn: Option<SingleOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fail: Option<SingleOutcome>,
}

impl TryFrom<RawOutcome> for Outcome {
    type Error = String;

    fn try_from(raw: RawOutcome) -> Result<Self, Self::Error> {
        match (raw.pass, raw.warn, raw.fail) {
            (Some(detail), None, None) => Ok(Outcome::Pass(detail)),
            (None, Some(detail), None) => Ok(Outcome::Warn(detail)),
            (None, None, Some(detail)) => Ok(Outcome::Fail(detail)),
            (None, None, None) => {
                Err("outcome must define one of pass, warn or fail".to_string())
            }
            _ => Err("outcome must define exactly one of pass, warn or fail".to_string()),
        }
    }
}

impl From<Outcome> for RawOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Pass(detail) => RawOutcome {
                pass: Some(detail),
                ..RawOutcome::default()
            },
            Outcome::Warn(detail) => RawOutcome {
                warn: Some(detail),
                ..RawOutcome::default()
            },
            Outcome::Fail(detail) => RawOutcome {
                fail: Some(detail),
                ..RawOutcome::default()
            },
        }
    }
}

impl Outcome {
    pub fn pass(message: impl Into<String>) -> Self {
        Outcome::Pass(SingleOutcome {
            message: message.into(),
            uri: None,
        })
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Outcome::Warn(SingleOutcome {
            message: message.into(),
            uri: None,
        })
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::Fail(SingleOutcome {
            message: message.into(),
            uri: None,
        })
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Pass(_) => OutcomeKind::Pass,
            Outcome::Warn(_) => OutcomeKind::Warn,
            Outcome::Fail(_) => OutcomeKind::Fail,
        }
    }

    pub fn detail(&self) -> &SingleOutcome {
        match self {
            Outcome::Pass(detail) | Outcome::Warn(detail) | Outcome::Fail(detail) => detail,
        }
    }

    pub fn message(&self) -> &str {
        &self.detail().message
    }
}

/// Outcomes in declaration order; the first applicable one wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeSet(Vec<Outcome>);

impl OutcomeSet {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self(outcomes)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First outcome of `kind` in declaration order
    pub fn first_of_kind(&self, kind: OutcomeKind) -> Option<&Outcome> {
        self.0.iter().find(|outcome| outcome.kind() == kind)
    }
}

impl From<Vec<Outcome>> for OutcomeSet {
    fn from(outcomes: Vec<Outcome>) -> Self {
        Self(outcomes)
    }
}

impl FromIterator<Outcome> for OutcomeSet {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OutcomeSet {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Select the outcome that applies to `classification`.
///
/// Returns the first outcome whose kind matches the classification's kind,
/// wrapped as an [`AnalyzeResult`]. Entries of other kinds are skipped
/// regardless of where they appear.
///
/// # Errors
///
/// [`AnalyzeError::NoApplicableOutcome`] when no outcome of the required kind
/// is declared.
///
/// # Example
///
/// ```
/// use rust_troubleshoot::analyzers::{resolve, Outcome, OutcomeSet};
///
/// let outcomes = OutcomeSet::from(vec![Outcome::pass("pass"), Outcome::fail("fail")]);
/// let result = resolve(&outcomes, false).unwrap();
/// assert!(result.is_fail());
/// assert_eq!(result.message(), "fail");
/// ```
pub fn resolve<C: Classification>(
    outcomes: &OutcomeSet,
    classification: C,
) -> Result<AnalyzeResult, AnalyzeError> {
    let required = classification.outcome_kind();
    outcomes
        .first_of_kind(required)
        .map(AnalyzeResult::from_outcome)
        .ok_or(AnalyzeError::NoApplicableOutcome { required })
}
