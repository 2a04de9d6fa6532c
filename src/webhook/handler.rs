// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! AdmissionReview handling for the autoconf endpoint

use crate::autoconf::naming::non_empty;
use crate::autoconf::{build_patch, configure_annotation, into_json_patch, should_configure, PatchOperation};
use crate::config::AutoconfConfig;
use crate::error::{AutoconfError, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview};
use kube::core::DynamicObject;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// Decode a request body into the pod admission request it carries
pub fn decode(body: &[u8]) -> Result<AdmissionRequest<Pod>> {
    let review: AdmissionReview<Pod> =
        serde_json::from_slice(body).map_err(|e| AutoconfError::InvalidReview(e.to_string()))?;

    TryInto::<AdmissionRequest<Pod>>::try_into(review).map_err(|e| AutoconfError::InvalidReview(e.to_string()))
}

/// Decode an incoming review body and produce the response review.
///
/// Every failure is answered with a review that denies the request. A body
/// that cannot be decoded has no UID to echo, so its response carries none.
pub fn review<R: Rng + ?Sized>(
    config: &AutoconfConfig,
    body: &[u8],
    rng: &mut R,
) -> AdmissionReview<DynamicObject> {
    let request = match decode(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejecting admission review: {}", e);
            return AdmissionResponse::invalid(e.to_string()).into_review();
        }
    };

    admit(config, &request, rng).into_review()
}

/// Run the admission decision for a single request
#[instrument(skip_all, fields(uid = %request.uid))]
pub fn admit<R: Rng + ?Sized>(
    config: &AutoconfConfig,
    request: &AdmissionRequest<Pod>,
    rng: &mut R,
) -> AdmissionResponse {
    let patch = configure_pod(config, request, rng)
        .and_then(|patch| patch.as_deref().map(into_json_patch).transpose());

    match patch {
        Ok(None) => AdmissionResponse::from(request),
        Ok(Some(patch)) => match AdmissionResponse::from(request).with_patch(patch) {
            Ok(response) => response,
            Err(e) => deny(request, AutoconfError::PatchEncoding(e.to_string())),
        },
        Err(e) => deny(request, e),
    }
}

fn deny(request: &AdmissionRequest<Pod>, e: AutoconfError) -> AdmissionResponse {
    warn!(
        "Denying pod {}/{}: {}",
        request.namespace.as_deref().unwrap_or_default(),
        request.name,
        e
    );
    AdmissionResponse::from(request).deny(e.to_string())
}

/// Decide whether the pod of `request` gets configured and build its patch.
///
/// `Ok(None)` means the pod is admitted unchanged.
pub fn configure_pod<R: Rng + ?Sized>(
    config: &AutoconfConfig,
    request: &AdmissionRequest<Pod>,
    rng: &mut R,
) -> Result<Option<Vec<PatchOperation>>> {
    let pod = request.object.as_ref().ok_or(AutoconfError::MissingObject)?;
    let request_namespace = request.namespace.as_deref().unwrap_or_default();

    let namespace = non_empty(pod.metadata.namespace.as_deref(), request_namespace);
    let name = non_empty(pod.metadata.name.as_deref(), &request.name);

    if !should_configure(configure_annotation(pod), config.configure_default, namespace, name) {
        debug!("Skipping pod {}/{}", namespace, name);
        return Ok(None);
    }

    info!("Configuring pod {}/{}", namespace, name);

    let patch = build_patch(&config.cluster_name, request_namespace, &request.name, pod, rng)?;
    debug!("Built patch with {} operations", patch.len());

    Ok(Some(patch))
}
