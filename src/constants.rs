// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Pod annotation keys read by the webhook
pub mod annotations {
    /// Explicitly enables ("true") or disables ("false") auto-configuration of a pod.
    /// Without it the `--configure-default` flag decides.
    pub const CONFIGURE: &str = "opencensus.io/configure";
}

/// Environment variables injected into every configured container
pub mod env {
    /// Resource type of the process
    pub const RESOURCE_TYPE: &str = "OC_RESOURCE_TYPE";
    /// Encoded resource labels of the process
    pub const RESOURCE_LABELS: &str = "OC_RESOURCE_LABELS";
    /// Value of `OC_RESOURCE_TYPE` for containers
    pub const CONTAINER_TYPE: &str = "container";
}

/// Resource label keys, in encoding order
pub mod labels {
    pub const CLUSTER_NAME: &str = "k8s.cluster.name";
    pub const NAMESPACE_NAME: &str = "k8s.namespace.name";
    pub const POD_NAME: &str = "k8s.pod.name";
    pub const CONTAINER_NAME: &str = "container.name";
    pub const DEPLOYMENT_NAME: &str = "k8s.deployment.name";
}

/// Pod name generation, mirroring the API server's generateName handling
pub mod naming {
    /// Maximum length of a generated object name
    pub const MAX_NAME_LENGTH: usize = 63;
    /// Length of the random suffix appended to a generate-name prefix
    pub const RANDOM_SUFFIX_LENGTH: usize = 5;
    /// Prefixes longer than this are truncated before the suffix is appended
    pub const MAX_PREFIX_LENGTH: usize = MAX_NAME_LENGTH - RANDOM_SUFFIX_LENGTH;
    /// Suffix alphabet: no vowels and no easily confused characters
    pub const SUFFIX_ALPHABET: &[u8] = b"bcdfghjklmnpqrstvwxz2456789";
}

/// HTTP endpoints served by the webhook
pub mod paths {
    pub const AUTOCONF: &str = "/autoconf";
    pub const HEALTHZ: &str = "/healthz";
    /// Largest accepted AdmissionReview body. The API server caps objects
    /// at 1.5 MiB, the review wraps one plus metadata.
    pub const MAX_BODY_BYTES: usize = 3 * 1024 * 1024;
}

/// The operator name used in logs and the CLI
pub const OPERATOR_NAME: &str = "oc-autoconf";
