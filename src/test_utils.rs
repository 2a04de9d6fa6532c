// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for building pods and admission reviews.

use crate::config::AutoconfConfig;
use k8s_openapi::api::core::v1::{Container, EnvVar, Pod, PodSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Deterministic random source for name generation
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn make_config(cluster_name: &str, configure_default: bool) -> AutoconfConfig {
    AutoconfConfig {
        cluster_name: cluster_name.to_string(),
        configure_default,
    }
}

pub fn make_container(name: &str, env: Option<Vec<EnvVar>>) -> Container {
    Container {
        name: name.to_string(),
        image: Some("registry.example.com/app:1.0".to_string()),
        env,
        ..Default::default()
    }
}

pub fn make_pod(name: Option<&str>, generate_name: Option<&str>, containers: Vec<Container>) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: name.map(str::to_string),
            generate_name: generate_name.map(str::to_string),
            ..Default::default()
        },
        spec: Some(PodSpec {
            containers,
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Create a pod JSON object as found in `request.object`
pub fn pod_json(metadata: serde_json::Value, containers: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": metadata,
        "spec": {"containers": containers}
    })
}

/// Create an AdmissionReview JSON request for a pod CREATE
pub fn review_json(uid: &str, namespace: &str, name: &str, object: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": uid,
            "kind": {"group": "", "version": "v1", "kind": "Pod"},
            "resource": {"group": "", "version": "v1", "resource": "pods"},
            "name": name,
            "namespace": namespace,
            "operation": "CREATE",
            "userInfo": {"username": "system:serviceaccount:kube-system:replicaset-controller"},
            "dryRun": false,
            "object": object
        }
    })
}

/// In-memory log sink for asserting on formatted tracing output
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a fmt subscriber writing into a buffer, returning the result and the logs
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
