// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JSON patch generation for pods that get auto-configured

use crate::autoconf::labels::ResourceLabels;
use crate::autoconf::naming::{deployment_name, resolve_identity};
use crate::constants::env;
use crate::error::{AutoconfError, Result};
use json_patch::jsonptr::PointerBuf;
use json_patch::AddOperation;
use k8s_openapi::api::core::v1::{EnvVar, Pod};
use rand::Rng;
use serde::{Serialize, Serializer};
use tracing::debug;

/// JSON patch operation kinds emitted by the webhook
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
}

/// Payload of a patch operation
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    Text(String),
    EnvVar(EnvVar),
    /// An empty JSON array, used to create a missing env list
    EmptyList,
}

impl Serialize for PatchValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PatchValue::Text(text) => serializer.serialize_str(text),
            PatchValue::EnvVar(var) => var.serialize(serializer),
            PatchValue::EmptyList => Vec::<EnvVar>::new().serialize(serializer),
        }
    }
}

/// A single RFC 6902 operation
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    pub value: PatchValue,
}

impl PatchOperation {
    pub fn add(path: impl Into<String>, value: PatchValue) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into(),
            value,
        }
    }

    /// Convert into the operation type carried by an admission response
    pub fn to_json_patch(&self) -> Result<json_patch::PatchOperation> {
        let path = PointerBuf::parse(self.path.as_str())
            .map_err(|e| AutoconfError::PatchEncoding(format!("{}: {}", self.path, e)))?;
        let value = serde_json::to_value(&self.value)
            .map_err(|e| AutoconfError::PatchEncoding(e.to_string()))?;

        Ok(match self.op {
            PatchOp::Add => json_patch::PatchOperation::Add(AddOperation { path, value }),
        })
    }
}

/// Collect a built patch into a `json_patch::Patch`
pub fn into_json_patch(patch: &[PatchOperation]) -> Result<json_patch::Patch> {
    patch
        .iter()
        .map(PatchOperation::to_json_patch)
        .collect::<Result<Vec<_>>>()
        .map(json_patch::Patch)
}

fn env_var(name: &str, value: String) -> PatchValue {
    PatchValue::EnvVar(EnvVar {
        name: name.to_string(),
        value: Some(value),
        ..Default::default()
    })
}

/// Build the patch that adds the resource environment variables to every container.
///
/// Container indices refer to the pod as submitted. Env vars the user set
/// before are not inspected, so variables with the same name end up
/// overridden by the appended ones. The configure annotation is the way to
/// opt out of that.
pub fn build_patch<R: Rng + ?Sized>(
    cluster_name: &str,
    request_namespace: &str,
    request_name: &str,
    pod: &Pod,
    rng: &mut R,
) -> Result<Vec<PatchOperation>> {
    let identity = resolve_identity(pod, request_namespace, request_name, rng)?;
    let mut patch = Vec::new();

    // The API server would generate the same kind of name, but only after
    // admission. Set it now so the labels below refer to the final name.
    if identity.generated {
        debug!("Generated pod name {}", identity.name);
        patch.push(PatchOperation::add(
            "/metadata/name",
            PatchValue::Text(identity.name.clone()),
        ));
    }

    let deployment = deployment_name(&identity.name);
    let containers = pod.spec.as_ref().map(|s| s.containers.as_slice()).unwrap_or_default();

    for (i, container) in containers.iter().enumerate() {
        let path = format!("/spec/containers/{}/env", i);

        if container.env.is_none() {
            patch.push(PatchOperation::add(path.clone(), PatchValue::EmptyList));
        }

        let labels = ResourceLabels {
            cluster: cluster_name.to_string(),
            namespace: identity.namespace.clone(),
            pod: identity.name.clone(),
            container: container.name.clone(),
            deployment: deployment.clone(),
        };

        patch.push(PatchOperation::add(
            format!("{}/-", path),
            env_var(env::RESOURCE_TYPE, env::CONTAINER_TYPE.to_string()),
        ));
        patch.push(PatchOperation::add(
            format!("{}/-", path),
            env_var(env::RESOURCE_LABELS, labels.encode()),
        ));
    }

    Ok(patch)
}
