// ABOUTME: Server binary for the recipe catalogue JSON API
// ABOUTME: Loads configuration, prepares the database, and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipebook Server Binary
//!
//! Starts the recipe catalogue API with the storage and identity adapters
//! selected by environment configuration.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use recipebook::{
    config::ServerConfig, database::Database, logging, resources::ServerResources, server,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "recipebook-server")]
#[command(about = "Recipebook - recipe catalogue JSON API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting recipebook server");
    info!("{}", config.summary());

    let database = Database::new(
        &config.database.url.to_connection_string(),
        config.database.max_connections,
    )
    .await?;

    if config.database.auto_migrate {
        database.migrate().await?;
    } else {
        info!("AUTO_MIGRATE disabled; skipping schema migration");
    }

    let port = config.http_port;
    let resources = Arc::new(ServerResources::from_config(database, config)?);

    server::run(resources, port).await
}
