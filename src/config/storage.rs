// ABOUTME: Object storage configuration for recipe images
// ABOUTME: Chooses between the local filesystem store and the in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{parse_var, var_or};
use crate::constants::network::DEFAULT_HTTP_PORT;
use crate::errors::{AppError, AppResult};
use crate::storage::{LocalObjectStore, MemoryObjectStore, ObjectStore};

/// Where uploaded images go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files under `STORAGE_ROOT`
    #[default]
    Local,
    /// Process memory; lost on restart
    Memory,
}

impl StorageBackend {
    /// Name as written in `STORAGE_BACKEND`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Memory => "memory",
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "fs" | "filesystem" => Ok(Self::Local),
            "memory" => Ok(Self::Memory),
            other => Err(AppError::config(format!(
                "Unknown storage backend {other}: expected local or memory"
            ))),
        }
    }
}

/// Image storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend to use
    pub backend: StorageBackend,
    /// Root directory for the local backend
    pub root: PathBuf,
    /// Public URL prefix objects are served from
    pub public_base_url: String,
}

impl StorageConfig {
    /// Load from `STORAGE_BACKEND`, `STORAGE_ROOT`, and `STORAGE_PUBLIC_BASE_URL`
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` for an unknown backend
    pub fn from_lookup<F>(lookup: &F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            backend: parse_var(lookup, "STORAGE_BACKEND", defaults.backend)?,
            root: PathBuf::from(var_or(
                lookup,
                "STORAGE_ROOT",
                &defaults.root.to_string_lossy(),
            )),
            public_base_url: var_or(lookup, "STORAGE_PUBLIC_BASE_URL", &defaults.public_base_url),
        })
    }

    /// Build the configured object store
    #[must_use]
    pub fn build_store(&self) -> Arc<dyn ObjectStore> {
        match self.backend {
            StorageBackend::Local => Arc::new(LocalObjectStore::new(
                self.root.clone(),
                self.public_base_url.clone(),
            )),
            StorageBackend::Memory => Arc::new(MemoryObjectStore::new()),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            root: PathBuf::from("./data/uploads"),
            public_base_url: format!("http://localhost:{DEFAULT_HTTP_PORT}/uploads"),
        }
    }
}
