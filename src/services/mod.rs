// ABOUTME: Domain service layer between HTTP handlers and storage
// ABOUTME: Composes the database managers with the object store and id generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services take the viewer identity as an explicit argument; nothing here
//! reads request state.

/// Recipe catalogue operations
pub mod recipes;

pub use recipes::{NewRecipe, RecipeService};
