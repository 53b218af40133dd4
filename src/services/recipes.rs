// ABOUTME: Recipe catalogue operations: create, update, list, view, edit form, and home feed
// ABOUTME: Uploads the image before the write transaction so a storage failure never touches the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::constants::home::{LATEST_LIMIT, POPULAR_LIMIT};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::identity::is_owner;
use crate::models::{
    Category, HomeFeed, RandomRecipeIds, RecipeContent, RecipeDetail, RecipeFilter, RecipeId,
    RecipeIdGenerator, RecipeSummary, RecipeView,
};
use crate::pagination::{Page, PageRequest};
use crate::storage::{ImageUpload, ObjectStore};

/// A recipe submission: the editable content plus the image to upload
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// Title, description, category, ingredients, and steps
    pub content: RecipeContent,
    /// Image bytes, resolved to a URL before anything is written
    pub image: ImageUpload,
}

/// Recipe catalogue service
#[derive(Clone)]
pub struct RecipeService {
    database: Database,
    store: Arc<dyn ObjectStore>,
    ids: Arc<dyn RecipeIdGenerator>,
}

impl RecipeService {
    /// Service issuing random recipe ids
    #[must_use]
    pub fn new(database: Database, store: Arc<dyn ObjectStore>) -> Self {
        Self::with_id_generator(database, store, Arc::new(RandomRecipeIds))
    }

    /// Service with an explicit id generator
    #[must_use]
    pub fn with_id_generator(
        database: Database,
        store: Arc<dyn ObjectStore>,
        ids: Arc<dyn RecipeIdGenerator>,
    ) -> Self {
        Self {
            database,
            store,
            ids,
        }
    }

    /// Database handle
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Publish a new recipe on behalf of `author_id`
    ///
    /// The image is stored first. If that fails nothing is written. Otherwise
    /// a fresh id is generated and the recipe, ingredients, and steps are
    /// written in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `STORAGE_ERROR` if the image cannot be stored, or a database
    /// error if the write transaction fails and is rolled back.
    pub async fn create(&self, author_id: Uuid, recipe: NewRecipe) -> AppResult<RecipeId> {
        let image_url = self.store.store(recipe.image).await.map_err(|e| {
            warn!(user.id = %author_id, error = %e, "Image upload failed; recipe not created");
            e
        })?;

        let id = self.ids.generate();
        self.database
            .recipes()
            .create(id, author_id, &image_url, &recipe.content)
            .await?;

        Ok(id)
    }

    /// Replace a recipe's content, ingredients, and steps
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the recipe does not exist, or a
    /// database error if the transaction fails
    pub async fn update(&self, recipe_id: RecipeId, content: RecipeContent) -> AppResult<()> {
        self.database.recipes().update(recipe_id, &content).await
    }

    /// One page of the filtered listing
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FILTER` for malformed filters, or a database error
    pub async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> AppResult<Page<RecipeSummary>> {
        self.database.recipes().list(filter, page).await
    }

    /// Detail page for `viewer`
    ///
    /// The aggregate is read first, then the view counter is bumped, so the
    /// returned `views` is the count before this visit.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the recipe does not exist, or a
    /// database error if the read fails
    pub async fn view(&self, recipe_id: RecipeId, viewer: Option<Uuid>) -> AppResult<RecipeView> {
        let recipe = self.load(recipe_id).await?;

        match self.database.recipes().increment_views(recipe_id).await {
            Ok(true) => {}
            Ok(false) => debug!(recipe.id = %recipe_id, "Recipe vanished before view was counted"),
            Err(e) => warn!(recipe.id = %recipe_id, error = %e, "Failed to count recipe view"),
        }

        let is_owner = is_owner(viewer, recipe.author.id);
        Ok(RecipeView { recipe, is_owner })
    }

    /// The hydrated recipe for the edit screen, without counting a view
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the recipe does not exist
    pub async fn edit_form(&self, recipe_id: RecipeId) -> AppResult<RecipeDetail> {
        self.load(recipe_id).await
    }

    /// Newest and most-viewed recipes for the landing page
    ///
    /// # Errors
    ///
    /// Returns an error if either feed query fails
    pub async fn home(&self) -> AppResult<HomeFeed> {
        let recipes = self.database.recipes();
        let latest = recipes.latest(LATEST_LIMIT).await?;
        let popular = recipes.popular(POPULAR_LIMIT).await?;
        debug!(
            latest = latest.len(),
            popular = popular.len(),
            "Home feed assembled"
        );
        Ok(HomeFeed { latest, popular })
    }

    /// Every category
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn categories(&self) -> AppResult<Vec<Category>> {
        self.database.categories().list().await
    }

    async fn load(&self, recipe_id: RecipeId) -> AppResult<RecipeDetail> {
        self.database
            .recipes()
            .detail(recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Recipe {recipe_id}"))
                    .with_resource_id(recipe_id.to_string())
            })
    }
}
