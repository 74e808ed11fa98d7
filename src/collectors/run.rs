use k8s_openapi::api::core::v1::{Container, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::collectors::template::{
    merge, FieldOverrides, MetadataOverride, PodSpecOverride, PodTemplate, TypeMeta,
};
use crate::config::EngineConfig;
use crate::constants::{
    DEFAULT_CONTAINER_NAME, DEFAULT_IMAGE_PULL_POLICY, RESTART_POLICY_NEVER, ROLE_LABEL_KEY,
    ROLE_LABEL_VALUE, RUN_OUTPUT_EXTENSION,
};
use crate::store::ArtifactKey;

/// Fields shared by every collector kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorMeta {
    #[serde(default)]
    pub collector_name: String,
    #[serde(default)]
    pub exclude: bool,
}

/// Collector that runs an ad-hoc command in a freshly created pod.
///
/// `image`, `command`, `args` and `image_pull_policy` are only used when no
/// `pod` template is supplied. `namespace` is advisory; the pod is always
/// placed in the namespace passed to [`build_pod`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCollectorSpec {
    #[serde(flatten)]
    pub meta: CollectorMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
    /// Full pod template; replaces the convenience fields above
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<PodTemplate>,
}

impl RunCollectorSpec {
    pub fn collector_name(&self) -> &str {
        &self.meta.collector_name
    }

    /// Key the pod's captured output is stored under
    pub fn output_key(&self) -> ArtifactKey {
        let name = self.collector_name();
        ArtifactKey::new(name, format!("{}.{}", name, RUN_OUTPUT_EXTENSION))
    }

    /// Build the pod in the namespace named by `config`
    pub fn build_pod_for(&self, config: &EngineConfig) -> PodTemplate {
        build_pod(self, &config.namespace)
    }
}

/// Fields every run-collector pod is forced to carry
pub fn run_pod_overrides(collector_name: &str, namespace: &str) -> FieldOverrides<PodTemplate> {
    FieldOverrides::new()
        .with(MetadataOverride::Name(collector_name.to_string()))
        .with(MetadataOverride::Namespace(namespace.to_string()))
        .with(MetadataOverride::Label {
            key: ROLE_LABEL_KEY.to_string(),
            value: ROLE_LABEL_VALUE.to_string(),
        })
        .with(PodSpecOverride::RestartPolicy(RESTART_POLICY_NEVER.to_string()))
}

/// Template synthesized from the convenience fields when no pod is supplied
fn default_template(spec: &RunCollectorSpec) -> PodTemplate {
    let image_pull_policy = spec
        .image_pull_policy
        .clone()
        .filter(|policy| !policy.is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_PULL_POLICY.to_string());

    PodTemplate {
        types: TypeMeta::of::<Pod>(),
        metadata: ObjectMeta::default(),
        spec: PodSpec {
            containers: vec![Container {
                name: DEFAULT_CONTAINER_NAME.to_string(),
                image: spec.image.clone(),
                command: spec.command.clone(),
                args: spec.args.clone(),
                image_pull_policy: Some(image_pull_policy),
                ..Container::default()
            }],
            ..PodSpec::default()
        },
        ..PodTemplate::default()
    }
}

/// Build the pod used to run an ad-hoc collector.
///
/// With no template a single `collector` container is synthesized from the
/// convenience fields. With a template, the template is kept as supplied
/// apart from the forced name, namespace, role label and restart policy.
///
/// # Example
///
/// ```
/// use rust_troubleshoot::collectors::{build_pod, CollectorMeta, RunCollectorSpec};
///
/// let spec = RunCollectorSpec {
///     meta: CollectorMeta { collector_name: "run-ping".to_string(), exclude: false },
///     image: Some("busybox:1".to_string()),
///     command: Some(vec!["ping".to_string()]),
///     ..RunCollectorSpec::default()
/// };
///
/// let pod = build_pod(&spec, "default");
/// assert_eq!(pod.metadata.name.as_deref(), Some("run-ping"));
/// assert_eq!(pod.spec.restart_policy.as_deref(), Some("Never"));
///
/// let pod = pod.into_pod().unwrap();
/// assert_eq!(pod.metadata.name.as_deref(), Some("run-ping"));
/// ```
pub fn build_pod(spec: &RunCollectorSpec, namespace: &str) -> PodTemplate {
    let template = match &spec.pod {
        Some(pod) => pod.clone(),
        None => default_template(spec),
    };

    let overrides = run_pod_overrides(spec.collector_name(), namespace);
    debug!(
        "Building pod for run collector {} in namespace {} ({} template, forcing {})",
        spec.collector_name(),
        namespace,
        if spec.pod.is_some() { "user" } else { "default" },
        overrides.paths().join(", ")
    );

    merge(Some(template), &overrides)
}
