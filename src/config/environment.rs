// ABOUTME: Server configuration assembled from environment variables
// ABOUTME: HTTP port, identity header, upload limit, plus database and storage sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{parse_var, var_or, DatabaseConfig, StorageConfig};
use crate::constants::network::{DEFAULT_HTTP_PORT, DEFAULT_IDENTITY_HEADER};
use crate::constants::storage::DEFAULT_MAX_UPLOAD_BYTES;
use crate::errors::{AppError, AppResult};

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Image storage configuration
    pub storage: StorageConfig,
    /// Header carrying the authenticated user id
    pub identity_header: String,
    /// Request body limit in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if any variable is malformed
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if any variable is malformed
    pub fn from_lookup<F>(lookup: &F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_upload_bytes = parse_var(lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        if max_upload_bytes == 0 {
            return Err(AppError::config("MAX_UPLOAD_BYTES must be greater than zero"));
        }

        Ok(Self {
            http_port: parse_var(lookup, "HTTP_PORT", DEFAULT_HTTP_PORT)?,
            database: DatabaseConfig::from_lookup(lookup)?,
            storage: StorageConfig::from_lookup(lookup)?,
            identity_header: var_or(lookup, "IDENTITY_HEADER", DEFAULT_IDENTITY_HEADER),
            max_upload_bytes,
        })
    }

    /// One-line description for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} database={} max_connections={} auto_migrate={} storage={} identity_header={} max_upload_bytes={}",
            self.http_port,
            self.database.url,
            self.database.max_connections,
            self.database.auto_migrate,
            self.storage.backend,
            self.identity_header,
            self.max_upload_bytes,
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
            identity_header: DEFAULT_IDENTITY_HEADER.to_owned(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
