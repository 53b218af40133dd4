// ABOUTME: Category lookup storage
// ABOUTME: Flat reference list used by listing filters and the recipe form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use sqlx::{Row, SqlitePool};

use crate::errors::{AppError, AppResult};
use crate::models::Category;

/// Category table manager
#[derive(Clone)]
pub struct CategoriesManager {
    pool: SqlitePool,
}

impl CategoriesManager {
    /// Create a new categories manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a category, returning the existing row if the name is taken
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(&self, name: &str) -> AppResult<Category> {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create category: {e}")))?;

        let row = sqlx::query("SELECT id, name FROM categories WHERE name = $1")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load category: {e}")))?;

        Ok(Category {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    /// All categories ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list categories: {e}")))?;

        Ok(rows
            .iter()
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }
}
