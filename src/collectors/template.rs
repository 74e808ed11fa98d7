//! Forced-field merging for Kubernetes resource templates.
//!
//! A user-supplied template is taken as-is and an explicit, ordered list of
//! field overrides is written on top of it. Everything the overrides do not
//! name is left exactly as supplied. Metadata overrides work for any resource
//! carrying an [`ObjectMeta`]; spec overrides are per resource kind.

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::core::v1::{Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::{Metadata, Resource};
use serde::{Deserialize, Serialize};

use crate::errors::TemplateError;

/// Resource type identity (`apiVersion` / `kind`).
///
/// Either half may be absent; whatever a template supplied is written back
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TypeMeta {
    /// Type identity of the `k8s_openapi` resource `K`
    pub fn of<K: Resource>() -> Self {
        Self {
            api_version: Some(K::API_VERSION.to_string()),
            kind: Some(K::KIND.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.api_version.is_none() && self.kind.is_none()
    }
}

/// A Pod manifest as a user wrote it.
///
/// Serializes to the standard Pod schema. `apiVersion` and `kind` are only
/// written when the template had them, and top-level fields other than
/// `metadata` and `spec` (such as `status`) are carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodTemplate {
    #[serde(flatten)]
    pub types: TypeMeta,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: PodSpec,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PodTemplate {
    /// Convert into a typed [`Pod`] ready for submission
    pub fn into_pod(self) -> Result<Pod, TemplateError> {
        Pod::try_from(self)
    }
}

fn check_type_field(
    field: &'static str,
    found: Option<&String>,
    expected: &str,
) -> Result<(), TemplateError> {
    match found {
        Some(value) if value != expected => Err(TemplateError::TypeMismatch {
            field,
            expected: expected.to_string(),
            found: value.clone(),
        }),
        _ => Ok(()),
    }
}

impl TryFrom<PodTemplate> for Pod {
    type Error = TemplateError;

    fn try_from(template: PodTemplate) -> Result<Self, Self::Error> {
        check_type_field("apiVersion", template.types.api_version.as_ref(), Pod::API_VERSION)?;
        check_type_field("kind", template.types.kind.as_ref(), Pod::KIND)?;

        let mut status = None;
        for (field, value) in template.extra {
            if field != "status" {
                return Err(TemplateError::UnknownField(field));
            }
            status = Some(serde_json::from_value(value).map_err(|source| {
                TemplateError::InvalidField {
                    field: field.clone(),
                    source,
                }
            })?);
        }

        Ok(Pod {
            metadata: template.metadata,
            spec: Some(template.spec),
            status,
        })
    }
}

/// Mutable access to a resource's object metadata
pub trait HasObjectMeta {
    fn object_meta(&self) -> &ObjectMeta;

    fn object_meta_mut(&mut self) -> &mut ObjectMeta;
}

impl HasObjectMeta for PodTemplate {
    fn object_meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn object_meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl<K> HasObjectMeta for K
where
    K: Metadata<Ty = ObjectMeta>,
{
    fn object_meta(&self) -> &ObjectMeta {
        self.metadata()
    }

    fn object_meta_mut(&mut self) -> &mut ObjectMeta {
        self.metadata_mut()
    }
}

/// One forced field of a resource of type `K`
pub trait FieldOverride<K>: fmt::Debug + Send + Sync {
    /// Dotted path of the field this override writes
    fn path(&self) -> String;

    fn apply(&self, resource: &mut K);
}

/// Overrides of `metadata` fields, valid for any [`HasObjectMeta`] resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOverride {
    Name(String),
    Namespace(String),
    /// Add or overwrite one label, leaving other labels untouched
    Label { key: String, value: String },
}

impl<K: HasObjectMeta> FieldOverride<K> for MetadataOverride {
    fn path(&self) -> String {
        match self {
            MetadataOverride::Name(_) => "metadata.name".to_string(),
            MetadataOverride::Namespace(_) => "metadata.namespace".to_string(),
            MetadataOverride::Label { key, .. } => format!("metadata.labels[{}]", key),
        }
    }

    fn apply(&self, resource: &mut K) {
        let metadata = resource.object_meta_mut();
        match self {
            MetadataOverride::Name(name) => metadata.name = Some(name.clone()),
            MetadataOverride::Namespace(namespace) => metadata.namespace = Some(namespace.clone()),
            MetadataOverride::Label { key, value } => {
                metadata
                    .labels
                    .get_or_insert_with(BTreeMap::new)
                    .insert(key.clone(), value.clone());
            }
        }
    }
}

/// Overrides of Pod `spec` fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodSpecOverride {
    RestartPolicy(String),
}

impl FieldOverride<PodTemplate> for PodSpecOverride {
    fn path(&self) -> String {
        match self {
            PodSpecOverride::RestartPolicy(_) => "spec.restartPolicy".to_string(),
        }
    }

    fn apply(&self, resource: &mut PodTemplate) {
        match self {
            PodSpecOverride::RestartPolicy(policy) => {
                resource.spec.restart_policy = Some(policy.clone())
            }
        }
    }
}

/// Ordered set of forced fields for resources of type `K`
#[derive(Debug)]
pub struct FieldOverrides<K> {
    overrides: Vec<Box<dyn FieldOverride<K>>>,
}

impl<K> Default for FieldOverrides<K> {
    fn default() -> Self {
        Self {
            overrides: Vec::new(),
        }
    }
}

impl<K> FieldOverrides<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an override; later overrides win over earlier ones
    pub fn with(mut self, field: impl FieldOverride<K> + 'static) -> Self {
        self.overrides.push(Box::new(field));
        self
    }

    pub fn paths(&self) -> Vec<String> {
        self.overrides.iter().map(|field| field.path()).collect()
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    pub fn apply(&self, resource: &mut K) {
        for field in &self.overrides {
            field.apply(resource);
        }
    }
}

/// Build a resource from an optional template with forced fields written last.
///
/// Without a template the resource starts from `K::default()`.
pub fn merge<K: Default>(template: Option<K>, overrides: &FieldOverrides<K>) -> K {
    let mut resource = template.unwrap_or_default();
    overrides.apply(&mut resource);
    resource
}
