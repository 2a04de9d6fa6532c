// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Decision and patch generation for pod auto-configuration.

pub mod decision;
pub mod labels;
pub mod naming;
pub mod patch;

pub use decision::{configure_annotation, should_configure};
pub use labels::ResourceLabels;
pub use naming::{deployment_name, resolve_identity, PodIdentity};
pub use patch::{build_patch, into_json_patch, PatchOp, PatchOperation, PatchValue};
