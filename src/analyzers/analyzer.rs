use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::analyzers::text::TextAnalyze;
use crate::config::EngineConfig;
use crate::errors::AnalyzeError;
use crate::models::AnalyzeResult;
use crate::store::ArtifactStore;

/// Fields shared by every analyzer kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMeta {
    /// Human-readable title for the check; falls back to the collector name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_name: Option<String>,
    /// Skip this analyzer during batch evaluation
    #[serde(default)]
    pub exclude: bool,
}

impl AnalyzeMeta {
    /// The check name when set and non-empty, otherwise `fallback`
    pub fn title_or(&self, fallback: &str) -> String {
        match self.check_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Contract every analyzer kind implements
pub trait Analyze {
    fn meta(&self) -> &AnalyzeMeta;

    fn title(&self) -> String;

    fn analyze(&self, store: &dyn ArtifactStore) -> Result<AnalyzeResult, AnalyzeError>;
}

/// The closed set of analyzer kinds.
///
/// Serialized with the kind as the single key, e.g. `textAnalyze: {...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnalyzer", into = "RawAnalyzer")]
pub enum Analyzer {
    TextAnalyze(TextAnalyze),
}

/// Wire form of [`Analyzer`]: one optional slot per kind
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalyzer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_analyze: Option<TextAnalyze>,
}

impl TryFrom<RawAnalyzer> for Analyzer {
    type Error = String;

    fn try_from(raw: RawAnalyzer) -> std::result::Result<Self, Self::Error> {
        match raw.text_analyze {
            Some(analyzer) => Ok(Analyzer::TextAnalyze(analyzer)),
            None => Err("analyzer must define a supported kind (textAnalyze)".to_string()),
        }
    }
}

impl From<Analyzer> for RawAnalyzer {
    fn from(analyzer: Analyzer) -> Self {
        match analyzer {
            Analyzer::TextAnalyze(analyzer) => RawAnalyzer {
                text_analyze: Some(analyzer),
            },
        }
    }
}

impl Analyzer {
    fn inner(&self) -> &dyn Analyze {
        match self {
            Analyzer::TextAnalyze(analyzer) => analyzer,
        }
    }
}

impl Analyze for Analyzer {
    fn meta(&self) -> &AnalyzeMeta {
        self.inner().meta()
    }

    fn title(&self) -> String {
        self.inner().title()
    }

    fn analyze(&self, store: &dyn ArtifactStore) -> Result<AnalyzeResult, AnalyzeError> {
        self.inner().analyze(store)
    }
}

impl From<TextAnalyze> for Analyzer {
    fn from(analyzer: TextAnalyze) -> Self {
        Analyzer::TextAnalyze(analyzer)
    }
}

/// Result of one analyzer in a batch, tagged with the analyzer's title
#[derive(Debug)]
pub struct AnalyzerOutcome {
    pub title: String,
    pub result: Result<AnalyzeResult, AnalyzeError>,
}

/// Evaluates analyzers in parallel on a bounded worker pool
pub struct AnalysisEngine {
    pool: ThreadPool,
}

impl AnalysisEngine {
    /// Create an engine sized from `config`
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let threads = config.worker_threads();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("analyzer-{}", index))
            .build()
            .context("Failed to build analyzer thread pool")?;

        debug!("Analysis engine using {} worker threads", threads);
        Ok(Self { pool })
    }

    pub fn worker_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Evaluate every non-excluded analyzer against `store`.
    ///
    /// Outcomes are returned in the order the analyzers were given. An error
    /// in one analyzer is recorded in its own entry and does not stop the
    /// others.
    pub fn analyze_all(
        &self,
        analyzers: &[Analyzer],
        store: &dyn ArtifactStore,
    ) -> Vec<AnalyzerOutcome> {
        let excluded = analyzers.iter().filter(|a| a.meta().exclude).count();
        info!(
            "Running {} analyzers ({} excluded)",
            analyzers.len() - excluded,
            excluded
        );

        let outcomes: Vec<AnalyzerOutcome> = self.pool.install(|| {
            analyzers
                .par_iter()
                .filter(|analyzer| !analyzer.meta().exclude)
                .map(|analyzer| AnalyzerOutcome {
                    title: analyzer.title(),
                    result: analyzer.analyze(store),
                })
                .collect()
        });

        info!("Completed {} analyzers", outcomes.len());
        outcomes
    }
}
