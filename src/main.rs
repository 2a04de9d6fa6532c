// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use oc_autoconf::config::{AutoconfArgs, Cli, Command};
use oc_autoconf::webhook;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Autoconf(args) => run_autoconf(args).await,
    }
}

async fn run_autoconf(args: AutoconfArgs) -> Result<()> {
    let (config, server) = args.into_configs();

    info!("Starting OpenCensus autoconf webhook");
    info!(
        "Configuration loaded: cluster_name={:?}, configure_default={}",
        config.cluster_name, config.configure_default
    );

    webhook::serve(config, server)
        .await
        .context("Webhook server failed")
}
