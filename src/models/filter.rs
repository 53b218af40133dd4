// ABOUTME: Listing filter for the recipe catalogue (categories, rating threshold, title search)
// ABOUTME: Separates row predicates from the post-aggregation rating predicate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::ratings::{MAX_RATING, MIN_RATING};
use crate::errors::{AppError, AppResult};

/// Optional, conjunctive filters for the recipe listing
///
/// `categories` and `title` restrict individual recipe rows before grouping.
/// `min_rating` is applied after aggregation to the per-recipe average, so a
/// recipe without reviews never satisfies it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeFilter {
    /// Restrict to these categories; empty means no restriction
    #[serde(default)]
    pub categories: Vec<i64>,
    /// Minimum average rating (inclusive)
    pub min_rating: Option<f64>,
    /// Substring to look for in the title
    pub title: Option<String>,
}

impl RecipeFilter {
    /// Whether any filter is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.min_rating.is_none() && self.title.is_none()
    }

    /// Reject filter values no query could meaningfully apply
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FILTER` for non-positive category ids, a rating outside
    /// the review scale (or not finite), or an empty title string.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(bad) = self.categories.iter().find(|id| **id <= 0) {
            return Err(AppError::invalid_filter(format!(
                "category id must be a positive integer, got {bad}"
            )));
        }

        if let Some(rating) = self.min_rating {
            if !rating.is_finite()
                || rating < f64::from(MIN_RATING)
                || rating > f64::from(MAX_RATING)
            {
                return Err(AppError::invalid_filter(format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
                )));
            }
        }

        if matches!(self.title.as_deref(), Some("")) {
            return Err(AppError::invalid_filter("title filter must not be empty"));
        }

        Ok(())
    }
}
