// ABOUTME: Main library entry point for the recipebook catalogue service
// ABOUTME: Recipe storage, filtered listing, view counting, and the JSON API over them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipebook
//!
//! A recipe catalogue: users browse, filter, create, and review recipes made
//! of ingredients and ordered steps.
//!
//! ## Architecture
//!
//! - **Database**: `SQLite` schema, the all-or-nothing recipe write
//!   transaction, the aggregate listing query, and the atomic view counter
//! - **Storage**: object store that turns image bytes into a public URL
//! - **Identity**: resolves the current user and answers ownership questions
//! - **Services**: the recipe catalogue operations
//! - **Routes**: thin axum handlers over the services
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipebook::config::ServerConfig;
//! use recipebook::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("recipebook configured: {}", config.summary());
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` storage: pool, migrations, transactions, and table managers
pub mod database;

/// Unified error handling
pub mod errors;

/// Current-user resolution and ownership check
pub mod identity;

/// Structured logging setup
pub mod logging;

/// Domain models
pub mod models;

/// Page-numbered listing types
pub mod pagination;

/// Shared state handed to route handlers
pub mod resources;

/// `HTTP` route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;

/// Domain services
pub mod services;

/// Object storage for recipe images
pub mod storage;
