// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Opt-in/opt-out decision for pod auto-configuration

use crate::constants::annotations;
use k8s_openapi::api::core::v1::Pod;
use tracing::warn;

/// Parse a boolean literal the way the configure annotation has always been read.
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false counterparts.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Get the raw value of the configure annotation, if the pod carries one
pub fn configure_annotation(pod: &Pod) -> Option<&str> {
    pod.metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(annotations::CONFIGURE))
        .map(|s| s.as_str())
}

/// Decide whether a pod gets configured.
///
/// A valid annotation value wins. A missing annotation falls back to
/// `default_policy` silently, an unparsable one falls back with a warning
/// naming `namespace/name` of the pod.
pub fn should_configure(
    annotation: Option<&str>,
    default_policy: bool,
    namespace: &str,
    name: &str,
) -> bool {
    let Some(value) = annotation else {
        return default_policy;
    };

    match parse_bool(value) {
        Some(configure) => configure,
        None => {
            warn!(
                "Invalid value {:?} for annotation {} on pod {}/{}, continuing with default",
                value,
                annotations::CONFIGURE,
                namespace,
                name
            );
            default_policy
        }
    }
}
