//! Global constants for the rust-troubleshoot library.
//!
//! This module centralizes the platform-mandated values that the analyzer
//! engine and the run-collector pod builder rely on.

// Run-collector pod invariants
/// Label key used to mark pods created by a run collector
pub const ROLE_LABEL_KEY: &str = "troubleshoot-role";

/// Label value used to mark pods created by a run collector
pub const ROLE_LABEL_VALUE: &str = "run-collector";

/// Name of the single container synthesized when no pod template is supplied
pub const DEFAULT_CONTAINER_NAME: &str = "collector";

/// Restart policy forced onto every run-collector pod
pub const RESTART_POLICY_NEVER: &str = "Never";

/// Image pull policy used when a run collector does not set one
pub const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";

/// Namespace used when the engine configuration does not name one
pub const DEFAULT_NAMESPACE: &str = "default";

// Artifact naming
/// Extension of the file a run collector's output is stored under
pub const RUN_OUTPUT_EXTENSION: &str = "log";

/// Separator between collector name and file name in artifact lookup keys
pub const ARTIFACT_KEY_SEPARATOR: char = '/';

// Error messages
pub const ERROR_FAILED_TO_READ_CONFIG: &str = "Failed to read config file";
pub const ERROR_FAILED_TO_PARSE_CONFIG: &str = "Failed to parse YAML config";
pub const ERROR_FAILED_TO_WRITE_CONFIG: &str = "Failed to write config";
