// ABOUTME: Review storage
// ABOUTME: Reviews are read through recipe detail and the listing; this manager only inserts them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use sqlx::SqlitePool;

use super::format_timestamp;
use crate::errors::{AppError, AppResult};
use crate::models::NewReview;

/// Review table manager
#[derive(Clone)]
pub struct ReviewsManager {
    pool: SqlitePool,
}

impl ReviewsManager {
    /// Create a new reviews manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attach a review to a recipe
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a rating off the 1-5 scale, or a database
    /// error if the recipe or user does not exist
    pub async fn create(&self, review: &NewReview) -> AppResult<()> {
        review.validate()?;

        sqlx::query(
            r"
            INSERT INTO reviews (recipe_id, user_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(review.recipe_id.to_string())
        .bind(review.user_id.to_string())
        .bind(i64::from(review.rating))
        .bind(&review.comment)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create review: {e}")))?;

        Ok(())
    }
}
