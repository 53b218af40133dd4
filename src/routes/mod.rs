// ABOUTME: HTTP route modules for the recipe catalogue JSON API
// ABOUTME: Handlers are thin adapters over the recipe service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route modules
//!
//! Each module exposes a `*Routes` struct whose `routes` function returns an
//! axum `Router` bound to the shared [`ServerResources`](crate::resources::ServerResources).

/// Liveness and readiness probes
pub mod health;
/// Landing page feed and category lookup
pub mod home;
/// Recipe listing, detail, create, and update
pub mod recipes;

pub use health::HealthRoutes;
pub use home::HomeRoutes;
pub use recipes::RecipeRoutes;
