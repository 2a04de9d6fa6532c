// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::constants::OPERATOR_NAME;

/// Command line of the operator binary. Every flag can also be set through
/// the environment variable named next to it.
#[derive(Debug, Parser)]
#[command(name = OPERATOR_NAME, version, about = "OpenCensus resource auto-configuration operator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Admission webhook that automatically configures pods
    Autoconf(AutoconfArgs),
}

#[derive(Debug, Clone, Args)]
pub struct AutoconfArgs {
    /// Listen address for the webhook
    #[arg(long, env = "AUTOCONF_LISTEN_ADDRESS", default_value = "0.0.0.0:8443")]
    pub listen_address: SocketAddr,

    /// File containing the x509 certificate for the webhook
    #[arg(long = "tls-cert-file", env = "AUTOCONF_TLS_CERT_FILE", default_value = "/etc/tls/cert.pem")]
    pub tls_cert_file: PathBuf,

    /// File containing the x509 private key for the webhook
    #[arg(long = "tls-key-file", env = "AUTOCONF_TLS_KEY_FILE", default_value = "/etc/tls/key.pem")]
    pub tls_key_file: PathBuf,

    /// Name of the Kubernetes cluster
    #[arg(long, env = "AUTOCONF_CLUSTER_NAME", default_value = "")]
    pub cluster_name: String,

    /// Whether pods without an explicit annotation will be auto-configured
    #[arg(long, env = "AUTOCONF_CONFIGURE_DEFAULT")]
    pub configure_default: bool,
}

/// Immutable configuration of the admission logic, shared by all requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoconfConfig {
    /// Value of the `k8s.cluster.name` resource label
    pub cluster_name: String,
    /// Decision for pods that carry no (valid) configure annotation
    pub configure_default: bool,
}

/// Listener configuration of the webhook server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_address: SocketAddr,
    pub tls_cert_file: PathBuf,
    pub tls_key_file: PathBuf,
}

impl AutoconfArgs {
    /// Split the flags into the admission and listener configuration
    pub fn into_configs(self) -> (AutoconfConfig, ServerConfig) {
        (
            AutoconfConfig {
                cluster_name: self.cluster_name,
                configure_default: self.configure_default,
            },
            ServerConfig {
                listen_address: self.listen_address,
                tls_cert_file: self.tls_cert_file,
                tls_key_file: self.tls_key_file,
            },
        )
    }
}
