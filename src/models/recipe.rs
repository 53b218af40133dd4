// ABOUTME: Recipe aggregate models: identifiers, write payloads, listing rows, and hydrated detail
// ABOUTME: RecipeId tokens are generated before any insert so the id exists ahead of the transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Opaque recipe identifier
///
/// Random rather than sequential, so identifiers are unguessable and can be
/// assigned before the first insert. Assigned once at creation and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Wrap an existing UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl Display for RecipeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RecipeId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| AppError::not_found(format!("Recipe {s}")))
    }
}

/// Source of fresh recipe identifiers
///
/// Invoked by the service before the write transaction begins, decoupled from
/// the storage layer's insert path.
pub trait RecipeIdGenerator: Send + Sync {
    /// Produce a new, never-before-issued identifier
    fn generate(&self) -> RecipeId;
}

/// Production generator backed by random (v4) UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomRecipeIds;

impl RecipeIdGenerator for RandomRecipeIds {
    fn generate(&self) -> RecipeId {
        RecipeId(Uuid::new_v4())
    }
}

/// One submitted ingredient line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientInput {
    /// Ingredient name
    pub name: String,
    /// Free-text quantity ("1tsp", "a pinch")
    pub quantity: String,
}

/// The editable body of a recipe, shared by the create and update paths
///
/// Ingredient and step lists are complete replacement sets: whatever is
/// stored for the recipe afterwards is exactly these lists, in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeContent {
    /// Recipe title
    pub title: String,
    /// Recipe description
    pub description: String,
    /// Category the recipe is filed under
    pub category_id: i64,
    /// Ingredients in submission order
    pub ingredients: Vec<IngredientInput>,
    /// Step descriptions in submission order; step numbers are assigned from position
    pub steps: Vec<String>,
}

/// Stored ingredient row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name
    pub name: String,
    /// Free-text quantity
    pub quantity: String,
}

/// Stored step row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position, dense and contiguous per recipe
    pub step_number: u32,
    /// What to do in this step
    pub description: String,
}

/// Public identity of a user as shown next to recipes and reviews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// User identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
}

/// Review as shown on a recipe detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// Rating on the 1-5 scale
    pub rating: u8,
    /// Free-text comment
    pub comment: String,
    /// Reviewer
    pub user: Author,
}

/// Row of the filtered recipe listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Recipe identifier
    pub id: RecipeId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Resolved image URL
    pub image: String,
    /// Author display name
    pub author_name: String,
    /// Mean review rating; `None` when the recipe has no reviews
    pub average_rating: Option<f64>,
}

/// Compact recipe card for the landing page feeds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCard {
    /// Recipe identifier
    pub id: RecipeId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Resolved image URL
    pub image: String,
    /// Author display name
    pub author_name: String,
    /// View counter at read time
    pub views: u64,
}

/// Fully hydrated recipe aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDetail {
    /// Recipe identifier
    pub id: RecipeId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category reference
    pub category_id: i64,
    /// Resolved image URL
    pub image: String,
    /// Author
    pub author: Author,
    /// Ingredients in insertion order
    pub ingredients: Vec<Ingredient>,
    /// Steps ordered by step number
    pub steps: Vec<Step>,
    /// Reviews, oldest first
    pub reviews: Vec<ReviewEntry>,
    /// View counter at read time
    pub views: u64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Detail page payload: the aggregate plus whether the viewer wrote it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeView {
    /// The hydrated recipe
    #[serde(flatten)]
    pub recipe: RecipeDetail,
    /// True iff the viewer is authenticated and authored the recipe
    pub is_owner: bool,
}

/// Landing page payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeFeed {
    /// Newest recipes first
    pub latest: Vec<RecipeCard>,
    /// Most-viewed recipes first
    pub popular: Vec<RecipeCard>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_id_round_trips_through_display() {
        let id = RandomRecipeIds.generate();
        let parsed: RecipeId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_malformed_recipe_id_is_not_found() {
        let err = "not-a-token".parse::<RecipeId>().unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ResourceNotFound);
    }

    #[test]
    fn test_generated_ids_do_not_collide() {
        let a = RandomRecipeIds.generate();
        let b = RandomRecipeIds.generate();
        assert_ne!(a, b);
    }
}
