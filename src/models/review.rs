// ABOUTME: Review write model
// ABOUTME: Reviews are read through recipe detail; creation exists for seeding and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::ratings::{MAX_RATING, MIN_RATING};
use crate::errors::{AppError, AppResult};

use super::RecipeId;

/// A review to be attached to a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    /// Reviewed recipe
    pub recipe_id: RecipeId,
    /// Reviewer
    pub user_id: Uuid,
    /// Rating on the 1-5 scale
    pub rating: u8,
    /// Free-text comment
    pub comment: String,
}

impl NewReview {
    /// Check the rating is on the review scale
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` if the rating is outside 1-5.
    pub fn validate(&self) -> AppResult<()> {
        if (MIN_RATING..=MAX_RATING).contains(&self.rating) {
            Ok(())
        } else {
            Err(AppError::invalid_input(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                self.rating
            )))
        }
    }
}
