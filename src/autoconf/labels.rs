// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource label encoding for `OC_RESOURCE_LABELS`

use crate::constants::labels;
use std::fmt::Write;

/// Identity of a container as seen by the tracing resource detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLabels {
    pub cluster: String,
    pub namespace: String,
    pub pod: String,
    pub container: String,
    pub deployment: Option<String>,
}

impl ResourceLabels {
    /// Key/value pairs in encoding order. The deployment label is left out
    /// entirely when unknown.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            (labels::CLUSTER_NAME, self.cluster.as_str()),
            (labels::NAMESPACE_NAME, self.namespace.as_str()),
            (labels::POD_NAME, self.pod.as_str()),
            (labels::CONTAINER_NAME, self.container.as_str()),
        ];
        if let Some(deployment) = self.deployment.as_deref().filter(|d| !d.is_empty()) {
            pairs.push((labels::DEPLOYMENT_NAME, deployment));
        }
        pairs
    }

    /// Encode as `key="value"` pairs separated by commas
    pub fn encode(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.pairs().into_iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(key);
            out.push('=');
            push_quoted(&mut out, value);
        }
        out
    }
}

/// Append `value` as a double quoted string literal.
///
/// Escapes follow Go's `strconv.Quote` so consumers parsing the variable with
/// Go semantics read the original value back. Printable non-ASCII characters
/// are kept as-is.
fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            // Writing into a String cannot fail
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
