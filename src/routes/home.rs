// ABOUTME: Landing page and category lookup routes
// ABOUTME: GET /api/home and GET /api/categories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Category;
use crate::resources::ServerResources;

/// Response for the category lookup
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    /// All categories ordered by name
    pub categories: Vec<Category>,
}

/// Home and category routes
pub struct HomeRoutes;

impl HomeRoutes {
    /// Create the home feed and category routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/home", get(Self::handle_home))
            .route("/api/categories", get(Self::handle_categories))
            .with_state(resources)
    }

    /// Handle GET /api/home - newest and most viewed recipes
    async fn handle_home(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let feed = resources.recipes.home().await?;
        Ok((StatusCode::OK, Json(feed)).into_response())
    }

    /// Handle GET /api/categories
    async fn handle_categories(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let categories = resources.recipes.categories().await?;
        Ok((StatusCode::OK, Json(CategoriesResponse { categories })).into_response())
    }
}
