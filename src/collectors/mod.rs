//! Kubernetes-side collector definitions.
//!
//! Collectors describe how artifacts are gathered from a cluster. This crate
//! only builds the resources a collector needs; creating them, waiting on them
//! and capturing their output is done by the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           RunCollectorSpec              │
//! ├─────────────────────────────────────────┤
//! │   default template  │  user template    │
//! │   (image/command)   │  (full Pod)       │
//! ├─────────────────────────────────────────┤
//! │    forced fields (name, namespace,      │
//! │    role label, restartPolicy=Never)     │
//! ├─────────────────────────────────────────┤
//! │             PodTemplate                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use rust_troubleshoot::collectors::{build_pod, RunCollectorSpec};
//!
//! let spec: RunCollectorSpec = serde_yaml::from_str(
//!     "collectorName: run-ping\nimage: busybox:1\ncommand: [ping, -c, '1', '8.8.8.8']\n",
//! )
//! .unwrap();
//!
//! let pod = build_pod(&spec, "default");
//! assert_eq!(pod.spec.containers[0].name, "collector");
//! assert_eq!(spec.output_key().lookup_key(), "run-ping/run-ping.log");
//! ```

/// Run-collector pod construction
pub mod run;

/// Template merging with forced fields
pub mod template;

pub use run::{build_pod, run_pod_overrides, CollectorMeta, RunCollectorSpec};
pub use template::{
    merge, FieldOverride, FieldOverrides, HasObjectMeta, MetadataOverride, PodSpecOverride,
    PodTemplate, TypeMeta,
};
