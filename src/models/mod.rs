// ABOUTME: Domain models for the recipe catalogue
// ABOUTME: Recipes, filters, categories, users, and reviews
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain data types shared by the storage, service, and HTTP layers.

/// Category reference data
mod category;
/// Listing filter
mod filter;
/// Recipe aggregate and identifiers
mod recipe;
/// Review write model
mod review;
/// Users (authors and reviewers)
mod user;

pub use category::Category;
pub use filter::RecipeFilter;
pub use recipe::{
    Author, HomeFeed, Ingredient, IngredientInput, RandomRecipeIds, RecipeCard, RecipeContent,
    RecipeDetail, RecipeId, RecipeIdGenerator, RecipeSummary, RecipeView, ReviewEntry, Step,
};
pub use review::NewReview;
pub use user::User;
