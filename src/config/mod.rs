// ABOUTME: Configuration module for the recipe catalogue server
// ABOUTME: Environment-only settings for HTTP, database, object storage, and identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! All settings come from environment variables. Every loader also accepts a
//! lookup function so tests can supply variables without touching the
//! process environment.

/// Database URL and pool settings
pub mod database;
/// Server configuration assembled from the environment
pub mod environment;
/// Object storage backend settings
pub mod storage;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::ServerConfig;
pub use storage::{StorageBackend, StorageConfig};

use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// Read `key` through `lookup`, parsing it when present
///
/// Unset and blank variables yield `default`.
pub(crate) fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value {raw:?}: {e}"))),
        _ => Ok(default),
    }
}

/// Read `key` through `lookup` as a string, falling back to `default`
pub(crate) fn var_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}
