//! # rust-troubleshoot
//!
//! Outcome resolution for cluster troubleshooting checks, plus construction of
//! the pods that run ad-hoc diagnostic commands.
//!
//! ## Overview
//!
//! Collectors gather artifacts from a cluster; analyzers inspect those
//! artifacts and turn them into pass, warn or fail verdicts. This crate holds
//! the evaluation side of that pipeline and the pod-building part of the
//! run collector. Talking to a cluster is left to the caller.
//!
//! ## Features
//!
//! - **Ordered outcome resolution**: the first outcome of the matching kind wins
//! - **Regex text analyzer**: byte-level search of a collected artifact
//! - **Parallel evaluation**: analyzers run on a bounded worker pool
//! - **Pluggable artifact stores**: in-memory or an extracted bundle directory
//! - **Run-collector pods**: a default pod or a user template with forced fields
//!
//! ## Usage
//!
//! ### Evaluating analyzers
//!
//! ```no_run
//! use rust_troubleshoot::analyzers::{create_analysis_summary, AnalysisEngine, Analyzer};
//! use rust_troubleshoot::config::EngineConfig;
//! use rust_troubleshoot::store::DirectoryArtifactStore;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = EngineConfig::default();
//! let analyzers: Vec<Analyzer> = serde_yaml::from_str(&std::fs::read_to_string("analyzers.yaml")?)?;
//! let store = DirectoryArtifactStore::new("/tmp/support-bundle");
//!
//! let engine = AnalysisEngine::new(&config)?;
//! let outcomes = engine.analyze_all(&analyzers, &store);
//!
//! println!("{}", create_analysis_summary(&outcomes)?);
//! # Ok(())
//! # }
//! ```
//!
//! ### Building a run-collector pod
//!
//! ```
//! use rust_troubleshoot::collectors::{build_pod, CollectorMeta, RunCollectorSpec};
//!
//! let spec = RunCollectorSpec {
//!     meta: CollectorMeta { collector_name: "run-lsmod".to_string(), exclude: false },
//!     image: Some("busybox:1".to_string()),
//!     command: Some(vec!["lsmod".to_string()]),
//!     ..RunCollectorSpec::default()
//! };
//!
//! let pod = build_pod(&spec, "default");
//! assert_eq!(pod.metadata.namespace.as_deref(), Some("default"));
//! ```
//!
//! ## Module Organization
//!
//! - [`analyzers`]: Outcome model, pattern matching and analyzer evaluation
//! - [`collectors`]: Run-collector pod construction and template merging
//! - [`store`]: Artifact stores analyzers read from
//! - [`models`]: Analyzer verdicts
//! - [`config`]: Engine configuration
//! - [`errors`]: Typed errors for analysis and artifact lookup
//! - [`logging`]: Terminal logger setup
//! - [`constants`]: Application-wide constants

/// Outcome resolution and analyzer evaluation
pub mod analyzers;

/// Run-collector pod construction
pub mod collectors;

/// Engine configuration management
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Error types for analysis and artifact lookup
pub mod errors;

/// Logger initialization
pub mod logging;

/// Core data models used throughout the crate
pub mod models;

/// Artifact storage backends
pub mod store;
