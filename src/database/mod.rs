// ABOUTME: Database bootstrap for the recipe catalogue: pool construction and schema migration
// ABOUTME: Exposes per-table managers that share the single SQLite pool
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Relational storage for recipes and the records around them. Owned child
//! rows (ingredients, steps, reviews) cascade with their recipe.

mod categories;
mod recipes;
mod reviews;
/// RAII transaction guard
pub mod transactions;
mod users;

pub use categories::CategoriesManager;
pub use recipes::{RecipesManager, INSERT_BATCH_ROWS};
pub use reviews::ReviewsManager;
pub use transactions::{SqliteTransactionGuard, TransactionGuard};
pub use users::UsersManager;

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Owner of the connection pool and the schema
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `database_url`, creating the file if it does not exist
    ///
    /// In-memory databases live inside a single connection, so the pool is
    /// capped at one connection for them regardless of `max_connections`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the connection fails
    pub async fn new(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL {database_url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:");
        if !in_memory {
            if let Some(dir) = options
                .get_filename()
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
            {
                tokio::fs::create_dir_all(dir).await.map_err(|e| {
                    AppError::config(format!(
                        "Failed to create database directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        let max_connections = if in_memory { 1 } else { max_connections.max(1) };

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if in_memory {
            // The database lives and dies with its one connection
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        debug!(max_connections, "Database pool ready");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests that build their own pool)
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Recipe storage
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Category lookups
    #[must_use]
    pub fn categories(&self) -> CategoriesManager {
        CategoriesManager::new(self.pool.clone())
    }

    /// User storage
    #[must_use]
    pub fn users(&self) -> UsersManager {
        UsersManager::new(self.pool.clone())
    }

    /// Review storage
    #[must_use]
    pub fn reviews(&self) -> ReviewsManager {
        ReviewsManager::new(self.pool.clone())
    }

    /// Round-trip a trivial query to confirm the database answers
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Create all tables and indexes if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_categories().await?;
        self.migrate_recipes().await?;
        self.migrate_reviews().await?;
        info!("Database migrations complete");
        Ok(())
    }

    async fn execute_ddl(&self, statement: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        Ok(())
    }

    async fn migrate_users(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .await
    }

    async fn migrate_categories(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .await
    }

    async fn migrate_recipes(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                category_id INTEGER NOT NULL REFERENCES categories(id),
                image TEXT NOT NULL,
                user_id TEXT NOT NULL REFERENCES users(id),
                views INTEGER NOT NULL DEFAULT 0 CHECK (views >= 0),
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                quantity TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS steps (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                step_number INTEGER NOT NULL CHECK (step_number >= 1),
                description TEXT NOT NULL,
                UNIQUE (recipe_id, step_number)
            )
            ",
        )
        .await?;

        self.execute_ddl("CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at)")
            .await?;
        self.execute_ddl("CREATE INDEX IF NOT EXISTS idx_recipes_views ON recipes(views)")
            .await?;
        self.execute_ddl("CREATE INDEX IF NOT EXISTS idx_recipes_category ON recipes(category_id)")
            .await?;
        self.execute_ddl("CREATE INDEX IF NOT EXISTS idx_recipes_user ON recipes(user_id)")
            .await?;
        self.execute_ddl(
            "CREATE INDEX IF NOT EXISTS idx_ingredients_recipe ON ingredients(recipe_id)",
        )
        .await
    }

    async fn migrate_reviews(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id TEXT NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id),
                rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
                comment TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_ddl("CREATE INDEX IF NOT EXISTS idx_reviews_recipe ON reviews(recipe_id)")
            .await
    }
}

/// Render a timestamp in the fixed-width form stored in TEXT columns
///
/// Fixed width keeps lexicographic order equal to chronological order.
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))
}

fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}
