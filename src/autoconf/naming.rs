// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod identity resolution and deployment name derivation

use crate::constants::naming::{MAX_PREFIX_LENGTH, RANDOM_SUFFIX_LENGTH, SUFFIX_ALPHABET};
use crate::error::{AutoconfError, Result};
use k8s_openapi::api::core::v1::Pod;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Pods of a deployment are named `[deployment]-[replicaset hash]-[pod suffix]`.
static DEPLOYMENT_POD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)-([0-9a-zA-Z]*)-([0-9a-zA-Z]*)$").expect("deployment pod name regex is valid")
});

/// Effective namespace and name of a pod under admission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodIdentity {
    pub namespace: String,
    pub name: String,
    /// Whether `name` was generated here and still has to be set on the pod
    pub generated: bool,
}

/// Pick the first non-empty value
pub(crate) fn non_empty<'a>(preferred: Option<&'a str>, fallback: &'a str) -> &'a str {
    preferred.filter(|s| !s.is_empty()).unwrap_or(fallback)
}

/// Resolve the namespace and name of a pod.
///
/// Values on the pod object take precedence over the ones of the admission
/// request. A pod that only has a generate-name prefix gets a name generated
/// the same way the API server would do it.
pub fn resolve_identity<R: Rng + ?Sized>(
    pod: &Pod,
    request_namespace: &str,
    request_name: &str,
    rng: &mut R,
) -> Result<PodIdentity> {
    let namespace = non_empty(pod.metadata.namespace.as_deref(), request_namespace).to_string();
    let name = non_empty(pod.metadata.name.as_deref(), request_name);

    if !name.is_empty() {
        return Ok(PodIdentity {
            namespace,
            name: name.to_string(),
            generated: false,
        });
    }

    match pod.metadata.generate_name.as_deref().filter(|s| !s.is_empty()) {
        Some(prefix) => Ok(PodIdentity {
            namespace,
            name: generate_name(prefix, rng),
            generated: true,
        }),
        None => Err(AutoconfError::NoName),
    }
}

/// Append a random suffix to a generate-name prefix, truncating overly long prefixes
pub fn generate_name<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    let mut end = prefix.len().min(MAX_PREFIX_LENGTH);
    while !prefix.is_char_boundary(end) {
        end -= 1;
    }

    let mut name = String::with_capacity(end + RANDOM_SUFFIX_LENGTH);
    name.push_str(&prefix[..end]);
    name.extend(
        (0..RANDOM_SUFFIX_LENGTH)
            .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char),
    );
    name
}

/// Extract the owning deployment from a pod name.
///
/// This only looks at the naming convention. Any pod whose name happens to
/// have two trailing alphanumeric segments is attributed to a deployment.
pub fn deployment_name(pod_name: &str) -> Option<String> {
    DEPLOYMENT_POD_NAME
        .captures(pod_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_pod, seeded_rng};

    #[test]
    fn test_deployment_name_from_deployment_pod() {
        assert_eq!(
            deployment_name("mysvc-7d9f8c6b79-abcde"),
            Some("mysvc".to_string())
        );
    }

    #[test]
    fn test_deployment_name_keeps_hyphenated_base() {
        assert_eq!(
            deployment_name("payment-api-5c6f7d8b9-x2k4q"),
            Some("payment-api".to_string())
        );
    }

    #[test]
    fn test_deployment_name_none_for_single_hyphen() {
        assert_eq!(deployment_name("standalone-pod"), None);
        assert_eq!(deployment_name("standalone"), None);
        assert_eq!(deployment_name(""), None);
    }

    #[test]
    fn test_deployment_name_none_for_non_alphanumeric_segment() {
        assert_eq!(deployment_name("web-abc_def-xyz"), None);
        assert_eq!(deployment_name("web-abc-x.z"), None);
    }

    #[test]
    fn test_deployment_name_none_for_empty_base() {
        assert_eq!(deployment_name("-abc-def"), None);
    }

    #[test]
    fn test_deployment_name_misattributes_matching_names() {
        // A stateful set pod named like this is reported as a deployment
        assert_eq!(deployment_name("db-primary-0"), Some("db".to_string()));
    }

    #[test]
    fn test_resolve_identity_prefers_pod_values() {
        let mut pod = make_pod(Some("web-1"), None, vec![]);
        pod.metadata.namespace = Some("shop".to_string());

        let identity = resolve_identity(&pod, "default", "other", &mut seeded_rng()).unwrap();

        assert_eq!(
            identity,
            PodIdentity {
                namespace: "shop".to_string(),
                name: "web-1".to_string(),
                generated: false,
            }
        );
    }

    #[test]
    fn test_resolve_identity_falls_back_to_request() {
        let mut pod = make_pod(Some(""), None, vec![]);
        pod.metadata.namespace = Some(String::new());

        let identity = resolve_identity(&pod, "default", "web-2", &mut seeded_rng()).unwrap();

        assert_eq!(identity.namespace, "default");
        assert_eq!(identity.name, "web-2");
        assert!(!identity.generated);
    }

    #[test]
    fn test_resolve_identity_generates_name() {
        let pod = make_pod(None, Some("mysvc-7d9f8c6b79-"), vec![]);

        let identity = resolve_identity(&pod, "default", "", &mut seeded_rng()).unwrap();

        assert!(identity.generated);
        assert!(identity.name.starts_with("mysvc-7d9f8c6b79-"));
        assert_eq!(identity.name.len(), "mysvc-7d9f8c6b79-".len() + RANDOM_SUFFIX_LENGTH);
    }

    #[test]
    fn test_resolve_identity_without_any_name_fails() {
        let pod = make_pod(None, None, vec![]);

        let result = resolve_identity(&pod, "default", "", &mut seeded_rng());

        assert!(matches!(result, Err(AutoconfError::NoName)));
    }

    #[test]
    fn test_resolve_identity_empty_generate_name_fails() {
        let pod = make_pod(None, Some(""), vec![]);

        let result = resolve_identity(&pod, "default", "", &mut seeded_rng());

        assert!(matches!(result, Err(AutoconfError::NoName)));
    }

    #[test]
    fn test_generate_name_uses_suffix_alphabet() {
        let mut rng = seeded_rng();
        for _ in 0..50 {
            let name = generate_name("job-", &mut rng);
            let suffix = &name["job-".len()..];
            assert_eq!(suffix.len(), RANDOM_SUFFIX_LENGTH);
            assert!(suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)), "{}", name);
        }
    }

    #[test]
    fn test_generate_name_truncates_long_prefix() {
        let prefix = "a".repeat(80);

        let name = generate_name(&prefix, &mut seeded_rng());

        assert_eq!(name.len(), MAX_PREFIX_LENGTH + RANDOM_SUFFIX_LENGTH);
        assert!(name.starts_with(&"a".repeat(MAX_PREFIX_LENGTH)));
    }

    #[test]
    fn test_generate_name_is_reproducible_with_same_seed() {
        assert_eq!(
            generate_name("web-", &mut seeded_rng()),
            generate_name("web-", &mut seeded_rng())
        );
    }

    #[test]
    fn test_non_empty_prefers_pod_value() {
        assert_eq!(non_empty(Some("shop"), "default"), "shop");
        assert_eq!(non_empty(Some(""), "default"), "default");
        assert_eq!(non_empty(None, "default"), "default");
    }
}
