use log::debug;
use serde::{Deserialize, Serialize};

use crate::analyzers::analyzer::{Analyze, AnalyzeMeta};
use crate::analyzers::outcome::{resolve, OutcomeSet};
use crate::analyzers::pattern::Pattern;
use crate::errors::AnalyzeError;
use crate::models::AnalyzeResult;
use crate::store::{ArtifactKey, ArtifactStore};

/// Analyzer that searches one collected text artifact for a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalyze {
    #[serde(flatten)]
    pub meta: AnalyzeMeta,
    pub collector_name: String,
    pub file_name: String,
    /// Regular expression searched for in the artifact; empty matches anything
    #[serde(rename = "regex", default)]
    pub regex_pattern: String,
    pub outcomes: OutcomeSet,
}

impl TextAnalyze {
    pub fn artifact_key(&self) -> ArtifactKey {
        ArtifactKey::new(&self.collector_name, &self.file_name)
    }
}

impl Analyze for TextAnalyze {
    fn meta(&self) -> &AnalyzeMeta {
        &self.meta
    }

    fn title(&self) -> String {
        self.meta.title_or(&self.collector_name)
    }

    fn analyze(&self, store: &dyn ArtifactStore) -> Result<AnalyzeResult, AnalyzeError> {
        analyze_text(self, store)
    }
}

/// Evaluate a text analyzer against the artifact it names.
///
/// The pattern is compiled first so a malformed rule is reported even when
/// the artifact is missing. A missing artifact is returned as
/// [`AnalyzeError::ArtifactNotFound`], never as a fail verdict.
pub fn analyze_text<S>(spec: &TextAnalyze, store: &S) -> Result<AnalyzeResult, AnalyzeError>
where
    S: ArtifactStore + ?Sized,
{
    let pattern = Pattern::compile(&spec.regex_pattern)?;
    let key = spec.artifact_key();
    let content = store.get(&key)?;

    let matched = pattern.is_match(&content);
    debug!(
        "Text analyzer {}: pattern {:?} against {} ({} bytes) matched={}",
        spec.title(),
        pattern.as_str(),
        key,
        content.len(),
        matched
    );

    Ok(resolve(&spec.outcomes, matched)?.with_title(spec.title()))
}
