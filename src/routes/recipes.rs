// ABOUTME: Route handlers for the recipe REST API
// ABOUTME: Listing with filters, detail with view counting, edit form, create with image upload, and update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! Reads are open to anonymous visitors. Writes need an identity from the
//! configured identity provider.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::{Query, QueryRejection};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::models::{
    Category, IngredientInput, RecipeContent, RecipeDetail, RecipeFilter, RecipeId, RecipeSummary,
};
use crate::pagination::{Page, PageRequest};
use crate::resources::ServerResources;
use crate::services::NewRecipe;
use crate::storage::ImageUpload;

/// Query string for the recipe listing
///
/// Every value is taken as raw text and parsed in `into_filter`; a query
/// string that does not deserialize at all (a repeated scalar key, or both
/// `categories` and `categories[]`) is mapped to `INVALID_FILTER` by the
/// handler. Empty values are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListRecipesQuery {
    /// Category ids; repeat the key (`categories=1&categories=2`) or use `categories[]`
    #[serde(default, alias = "categories[]")]
    pub categories: Vec<String>,
    /// Minimum average rating
    pub rating: Option<String>,
    /// Title substring
    pub title: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
}

impl ListRecipesQuery {
    /// Parse into a filter and a page request
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FILTER` for any value that does not parse or is out of range
    pub fn into_filter(self) -> AppResult<(RecipeFilter, PageRequest)> {
        let categories = self
            .categories
            .iter()
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    AppError::invalid_filter(format!("category must be an integer, got {raw:?}"))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let min_rating = non_empty(self.rating.as_deref())
            .map(|raw| {
                raw.parse::<f64>().map_err(|_| {
                    AppError::invalid_filter(format!("rating must be a number, got {raw:?}"))
                })
            })
            .transpose()?;

        let page = match non_empty(self.page.as_deref()) {
            None => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(page) if page >= 1 => page,
                _ => {
                    return Err(AppError::invalid_filter(format!(
                        "page must be a positive integer, got {raw:?}"
                    )))
                }
            },
        };

        let filter = RecipeFilter {
            categories,
            min_rating,
            title: self.title.filter(|title| !title.is_empty()),
        };
        filter.validate()?;

        Ok((filter, PageRequest::recipes(page)))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Response for the recipe listing
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    /// Recipes on this page, newest first
    pub recipes: Vec<RecipeSummary>,
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub per_page: u32,
    /// Total matching recipes
    pub total: u64,
    /// Whether a later page exists
    pub has_more: bool,
    /// Number of the last page, at least 1
    pub last_page: u64,
}

impl From<Page<RecipeSummary>> for ListRecipesResponse {
    fn from(page: Page<RecipeSummary>) -> Self {
        let last_page = page.last_page();
        Self {
            recipes: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            has_more: page.has_more,
            last_page,
        }
    }
}

/// Request body for creating a recipe
#[derive(Debug, Deserialize)]
pub struct CreateRecipeBody {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category id
    #[serde(alias = "category_id")]
    pub category: i64,
    /// Base64-encoded image
    pub image: String,
    /// MIME type of the image
    #[serde(default)]
    pub image_content_type: Option<String>,
    /// Ingredients in display order
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Step descriptions in order
    #[serde(default)]
    pub steps: Vec<String>,
}

impl CreateRecipeBody {
    fn into_new_recipe(self) -> AppResult<NewRecipe> {
        let bytes = STANDARD
            .decode(self.image.trim())
            .map_err(|e| AppError::invalid_input(format!("image is not valid base64: {e}")))?;

        Ok(NewRecipe {
            content: RecipeContent {
                title: self.title,
                description: self.description,
                category_id: self.category,
                ingredients: self.ingredients,
                steps: self.steps,
            },
            image: ImageUpload::new(bytes, self.image_content_type),
        })
    }
}

/// Request body for updating a recipe
#[derive(Debug, Deserialize)]
pub struct UpdateRecipeBody {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category id
    #[serde(alias = "category")]
    pub category_id: i64,
    /// Replacement ingredient set
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Replacement step list
    #[serde(default)]
    pub steps: Vec<String>,
}

impl From<UpdateRecipeBody> for RecipeContent {
    fn from(body: UpdateRecipeBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            category_id: body.category_id,
            ingredients: body.ingredients,
            steps: body.steps,
        }
    }
}

/// Response for a created recipe
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRecipeResponse {
    /// New recipe id
    pub id: RecipeId,
}

/// Response for the edit screen
#[derive(Debug, Serialize, Deserialize)]
pub struct EditRecipeResponse {
    /// Current recipe content
    #[serde(flatten)]
    pub recipe: RecipeDetail,
    /// Categories to choose from
    pub categories: Vec<Category>,
}

/// Recipe routes
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/recipes/:id",
                get(Self::handle_show).put(Self::handle_update),
            )
            .route("/api/recipes/:id/edit", get(Self::handle_edit))
            .with_state(resources)
    }

    /// Handle GET /api/recipes - filtered, paginated listing
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<ListRecipesQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) =
            query.map_err(|rejection| AppError::invalid_filter(rejection.to_string()))?;
        let (filter, page) = query.into_filter()?;
        let recipes = resources.recipes.list(&filter, page).await?;

        let response: ListRecipesResponse = recipes.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/recipes - publish a new recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateRecipeBody>,
    ) -> Result<Response, AppError> {
        let author_id = resources.identity.require_user_id(&headers)?;
        let recipe = body.into_new_recipe()?;

        let id = resources.recipes.create(author_id, recipe).await?;
        info!(recipe.id = %id, user.id = %author_id, "Recipe published");

        Ok((StatusCode::CREATED, Json(CreateRecipeResponse { id })).into_response())
    }

    /// Handle GET /api/recipes/:id - detail page, counts a view
    async fn handle_show(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let recipe_id: RecipeId = id.parse()?;
        let viewer = resources.identity.current_user_id(&headers);

        let view = resources.recipes.view(recipe_id, viewer).await?;
        Ok((StatusCode::OK, Json(view)).into_response())
    }

    /// Handle GET /api/recipes/:id/edit - edit form data, does not count a view
    async fn handle_edit(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let recipe_id: RecipeId = id.parse()?;

        let recipe = resources.recipes.edit_form(recipe_id).await?;
        let categories = resources.recipes.categories().await?;

        Ok((
            StatusCode::OK,
            Json(EditRecipeResponse { recipe, categories }),
        )
            .into_response())
    }

    /// Handle PUT /api/recipes/:id - replace content, ingredients, and steps
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateRecipeBody>,
    ) -> Result<Response, AppError> {
        resources.identity.require_user_id(&headers)?;
        let recipe_id: RecipeId = id.parse()?;

        resources.recipes.update(recipe_id, body.into()).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
