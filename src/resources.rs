// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the database, the recipe service, the identity provider, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::identity::{HeaderIdentityProvider, IdentityProvider};
use crate::services::RecipeService;
use crate::storage::ObjectStore;

/// Everything request handlers need, shared behind an `Arc`
#[derive(Clone)]
pub struct ServerResources {
    /// Database handle
    pub database: Database,
    /// Recipe catalogue operations
    pub recipes: RecipeService,
    /// Resolves the current user from request headers
    pub identity: Arc<dyn IdentityProvider>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from their parts
    #[must_use]
    pub fn new(
        database: Database,
        store: Arc<dyn ObjectStore>,
        identity: Arc<dyn IdentityProvider>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            recipes: RecipeService::new(database.clone(), store),
            database,
            identity,
            config,
        }
    }

    /// Resources wired the way `config` describes
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` if the identity header name is invalid
    pub fn from_config(database: Database, config: ServerConfig) -> AppResult<Self> {
        let store = config.storage.build_store();
        let identity = Arc::new(HeaderIdentityProvider::new(&config.identity_header)?);
        Ok(Self::new(database, store, identity, Arc::new(config)))
    }
}
