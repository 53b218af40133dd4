// ABOUTME: Recipe storage: the all-or-nothing write transaction, hydrated reads, and the filtered listing
// ABOUTME: Also owns the atomic view counter and the landing page feeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid, SqliteTransactionGuard};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{
    Author, Ingredient, RecipeCard, RecipeContent, RecipeDetail, RecipeFilter, RecipeId,
    RecipeSummary, ReviewEntry, Step,
};
use crate::pagination::{Page, PageRequest};

/// Rows per multi-row child insert; three binds each keeps a statement well
/// under `SQLite`'s default limit of 32766 variables
pub const INSERT_BATCH_ROWS: usize = 1000;

/// Recipe table manager
#[derive(Clone)]
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new recipe with its ingredients and steps in one transaction
    ///
    /// Either the recipe row and every child row are committed, or nothing is.
    /// The view counter starts at zero.
    ///
    /// # Errors
    ///
    /// Returns a database error if any statement fails; the transaction has been
    /// rolled back by the time the error is returned.
    pub async fn create(
        &self,
        id: RecipeId,
        author_id: Uuid,
        image_url: &str,
        content: &RecipeContent,
    ) -> AppResult<()> {
        let result = self
            .run_create(id, author_id, image_url, content)
            .await;

        match &result {
            Ok(()) => info!(
                recipe.id = %id,
                user.id = %author_id,
                ingredients = content.ingredients.len(),
                steps = content.steps.len(),
                "Recipe created"
            ),
            Err(e) => error!(
                recipe.id = %id,
                user.id = %author_id,
                error = %e,
                "Recipe write transaction failed and was rolled back"
            ),
        }
        result
    }

    async fn run_create(
        &self,
        id: RecipeId,
        author_id: Uuid,
        image_url: &str,
        content: &RecipeContent,
    ) -> AppResult<()> {
        let mut guard = self.begin().await?;
        let result = Self::insert_recipe(&mut guard, id, author_id, image_url, content).await;
        finish(guard, result).await
    }

    /// Replace a recipe's editable fields and its full ingredient and step sets
    ///
    /// The stored ingredient and step rows afterwards are exactly the submitted
    /// lists; nothing is merged with what was there before. The image, author,
    /// creation time, and view counter are left alone.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if no recipe has this id, or a database
    /// error if any statement fails. Nothing changes in either case.
    pub async fn update(&self, id: RecipeId, content: &RecipeContent) -> AppResult<()> {
        let result = self.run_update(id, content).await;

        match &result {
            Ok(()) => info!(recipe.id = %id, "Recipe updated"),
            Err(e) if e.code == ErrorCode::ResourceNotFound => {
                debug!(recipe.id = %id, "Update target does not exist");
            }
            Err(e) => error!(
                recipe.id = %id,
                error = %e,
                "Recipe update transaction failed and was rolled back"
            ),
        }
        result
    }

    async fn run_update(&self, id: RecipeId, content: &RecipeContent) -> AppResult<()> {
        let mut guard = self.begin().await?;
        let result = Self::replace_recipe(&mut guard, id, content).await;
        finish(guard, result).await
    }

    async fn begin(&self) -> AppResult<SqliteTransactionGuard<'static>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        Ok(SqliteTransactionGuard::new(tx))
    }

    async fn insert_recipe(
        guard: &mut SqliteTransactionGuard<'_>,
        id: RecipeId,
        author_id: Uuid,
        image_url: &str,
        content: &RecipeContent,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO recipes (
                id, title, description, category_id, image, user_id, views, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, 0, $7)
            ",
        )
        .bind(id.to_string())
        .bind(&content.title)
        .bind(&content.description)
        .bind(content.category_id)
        .bind(image_url)
        .bind(author_id.to_string())
        .bind(format_timestamp(Utc::now()))
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe: {e}")))?;

        Self::insert_children(guard, id, content).await
    }

    async fn replace_recipe(
        guard: &mut SqliteTransactionGuard<'_>,
        id: RecipeId,
        content: &RecipeContent,
    ) -> AppResult<()> {
        let updated = sqlx::query(
            r"
            UPDATE recipes
            SET title = $1, description = $2, category_id = $3
            WHERE id = $4
            ",
        )
        .bind(&content.title)
        .bind(&content.description)
        .bind(content.category_id)
        .bind(id.to_string())
        .execute(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to update recipe: {e}")))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {id}")).with_resource_id(id.to_string()));
        }

        sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
            .bind(id.to_string())
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear ingredients: {e}")))?;

        sqlx::query("DELETE FROM steps WHERE recipe_id = $1")
            .bind(id.to_string())
            .execute(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear steps: {e}")))?;

        Self::insert_children(guard, id, content).await
    }

    /// Insert ingredients in submission order, then steps numbered 1..=N
    ///
    /// Rows go in as multi-row statements of at most `INSERT_BATCH_ROWS` rows
    /// each so large payloads stay under the bind-variable limit.
    async fn insert_children(
        guard: &mut SqliteTransactionGuard<'_>,
        id: RecipeId,
        content: &RecipeContent,
    ) -> AppResult<()> {
        let recipe_id = id.to_string();

        for chunk in content.ingredients.chunks(INSERT_BATCH_ROWS) {
            let mut builder =
                QueryBuilder::<Sqlite>::new("INSERT INTO ingredients (recipe_id, name, quantity) ");
            builder.push_values(chunk, |mut row, ingredient| {
                row.push_bind(recipe_id.clone())
                    .push_bind(ingredient.name.clone())
                    .push_bind(ingredient.quantity.clone());
            });
            builder
                .build()
                .execute(guard.executor()?)
                .await
                .map_err(|e| AppError::database(format!("Failed to insert ingredients: {e}")))?;
        }

        for (batch, chunk) in content.steps.chunks(INSERT_BATCH_ROWS).enumerate() {
            let first_position = batch * INSERT_BATCH_ROWS;
            let mut builder = QueryBuilder::<Sqlite>::new(
                "INSERT INTO steps (recipe_id, step_number, description) ",
            );
            builder.push_values(
                chunk.iter().enumerate(),
                |mut row, (offset, description)| {
                    row.push_bind(recipe_id.clone())
                        .push_bind((first_position + offset + 1) as i64)
                        .push_bind(description.clone());
                },
            );
            builder
                .build()
                .execute(guard.executor()?)
                .await
                .map_err(|e| AppError::database(format!("Failed to insert steps: {e}")))?;
        }

        Ok(())
    }

    /// Load the full recipe aggregate as one consistent snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is malformed
    pub async fn detail(&self, id: RecipeId) -> AppResult<Option<RecipeDetail>> {
        let mut guard = self.begin().await?;
        let recipe_id = id.to_string();

        let row = sqlx::query(
            r"
            SELECT r.id, r.title, r.description, r.category_id, r.image, r.views, r.created_at,
                   u.id AS author_id, u.name AS author_name
            FROM recipes r
            INNER JOIN users u ON u.id = r.user_id
            WHERE r.id = $1
            ",
        )
        .bind(&recipe_id)
        .fetch_optional(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        let Some(row) = row else {
            guard.commit().await?;
            return Ok(None);
        };

        let ingredients = sqlx::query(
            "SELECT name, quantity FROM ingredients WHERE recipe_id = $1 ORDER BY id",
        )
        .bind(&recipe_id)
        .fetch_all(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to get ingredients: {e}")))?
        .iter()
        .map(|r| Ingredient {
            name: r.get("name"),
            quantity: r.get("quantity"),
        })
        .collect();

        let steps = sqlx::query(
            "SELECT step_number, description FROM steps WHERE recipe_id = $1 ORDER BY step_number",
        )
        .bind(&recipe_id)
        .fetch_all(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to get steps: {e}")))?
        .iter()
        .map(|r| Step {
            step_number: r.get::<i64, _>("step_number") as u32,
            description: r.get("description"),
        })
        .collect();

        let reviews = sqlx::query(
            r"
            SELECT rv.rating, rv.comment, u.id AS user_id, u.name AS user_name
            FROM reviews rv
            INNER JOIN users u ON u.id = rv.user_id
            WHERE rv.recipe_id = $1
            ORDER BY rv.created_at, rv.id
            ",
        )
        .bind(&recipe_id)
        .fetch_all(guard.executor()?)
        .await
        .map_err(|e| AppError::database(format!("Failed to get reviews: {e}")))?
        .iter()
        .map(row_to_review)
        .collect::<AppResult<Vec<_>>>()?;

        guard.commit().await?;

        let author_id: String = row.get("author_id");
        let created_at: String = row.get("created_at");
        Ok(Some(RecipeDetail {
            id,
            title: row.get("title"),
            description: row.get("description"),
            category_id: row.get("category_id"),
            image: row.get("image"),
            author: Author {
                id: parse_uuid(&author_id)?,
                name: row.get("author_name"),
            },
            ingredients,
            steps,
            reviews,
            views: row.get::<i64, _>("views") as u64,
            created_at: parse_timestamp(&created_at)?,
        }))
    }

    /// Add one to the view counter as a single atomic statement
    ///
    /// Returns whether a recipe with this id existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn increment_views(&self, id: RecipeId) -> AppResult<bool> {
        let result = sqlx::query("UPDATE recipes SET views = views + 1 WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to increment views: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// One page of the filtered listing, newest first, with the total match count
    ///
    /// The count and the page are read in one transaction so `total` and
    /// `has_more` agree with the returned items.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FILTER` if the filter is malformed, or a database error
    pub async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> AppResult<Page<RecipeSummary>> {
        filter.validate()?;

        let mut guard = self.begin().await?;

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) AS total FROM (");
        push_filtered_listing(&mut count_query, filter);
        count_query.push(")");
        let total: i64 = count_query
            .build()
            .fetch_one(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?
            .get("total");

        let mut query = QueryBuilder::<Sqlite>::new("");
        push_filtered_listing(&mut query, filter);
        query
            .push(" ORDER BY r.created_at DESC, r.rowid DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let rows = query
            .build()
            .fetch_all(guard.executor()?)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        guard.commit().await?;

        let items = rows
            .iter()
            .map(row_to_summary)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(items, page, total as u64))
    }

    /// The most recently created recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn latest(&self, limit: u32) -> AppResult<Vec<RecipeCard>> {
        self.cards("r.created_at DESC, r.rowid DESC", limit).await
    }

    /// The most viewed recipes, newest first among equal counts
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn popular(&self, limit: u32) -> AppResult<Vec<RecipeCard>> {
        self.cards("r.views DESC, r.created_at DESC, r.rowid DESC", limit)
            .await
    }

    async fn cards(&self, order_by: &'static str, limit: u32) -> AppResult<Vec<RecipeCard>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r"
            SELECT r.id, r.title, r.description, r.created_at, r.image, r.views,
                   u.name AS author_name
            FROM recipes r
            INNER JOIN users u ON u.id = r.user_id
            ORDER BY ",
        );
        query
            .push(order_by)
            .push(" LIMIT ")
            .push_bind(i64::from(limit));

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipe feed: {e}")))?;

        rows.iter().map(row_to_card).collect()
    }

    /// Total number of stored recipes
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;
        Ok(total as u64)
    }
}

/// Commit on success; on failure roll back and hand back the original error
async fn finish<T>(guard: SqliteTransactionGuard<'_>, result: AppResult<T>) -> AppResult<T> {
    match result {
        Ok(value) => {
            guard.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_error) = guard.rollback().await {
                warn!(error = %rollback_error, "Explicit rollback failed");
            }
            Err(e)
        }
    }
}

/// Grouped listing query without ordering or paging
///
/// Category and title predicates filter recipe rows before grouping. The
/// rating threshold is a HAVING clause on the per-recipe average, so recipes
/// without reviews (NULL average) never pass it.
fn push_filtered_listing(builder: &mut QueryBuilder<'_, Sqlite>, filter: &RecipeFilter) {
    builder.push(
        r"
        SELECT r.id, r.title, r.description, r.created_at, r.image,
               u.name AS author_name, AVG(rv.rating) AS average_rating
        FROM recipes r
        INNER JOIN users u ON u.id = r.user_id
        LEFT JOIN reviews rv ON rv.recipe_id = r.id",
    );

    let mut has_where = false;
    if !filter.categories.is_empty() {
        builder.push(" WHERE r.category_id IN (");
        let mut ids = builder.separated(", ");
        for category_id in &filter.categories {
            ids.push_bind(*category_id);
        }
        ids.push_unseparated(")");
        has_where = true;
    }

    if let Some(title) = &filter.title {
        builder
            .push(if has_where { " AND " } else { " WHERE " })
            .push("r.title LIKE ")
            .push_bind(contains_pattern(title))
            .push(" ESCAPE '\\'");
    }

    builder.push(" GROUP BY r.id");

    if let Some(min_rating) = filter.min_rating {
        builder
            .push(" HAVING AVG(rv.rating) >= ")
            .push_bind(min_rating);
    }
}

/// `%text%` with LIKE metacharacters in `text` matched literally
fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn row_to_summary(row: &SqliteRow) -> AppResult<RecipeSummary> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    Ok(RecipeSummary {
        id: RecipeId::from_uuid(parse_uuid(&id)?),
        title: row.get("title"),
        description: row.get("description"),
        created_at: parse_timestamp(&created_at)?,
        image: row.get("image"),
        author_name: row.get("author_name"),
        average_rating: row.get("average_rating"),
    })
}

fn row_to_card(row: &SqliteRow) -> AppResult<RecipeCard> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    let views: i64 = row.get("views");
    Ok(RecipeCard {
        id: RecipeId::from_uuid(parse_uuid(&id)?),
        title: row.get("title"),
        description: row.get("description"),
        created_at: parse_timestamp(&created_at)?,
        image: row.get("image"),
        author_name: row.get("author_name"),
        views: views as u64,
    })
}

fn row_to_review(row: &SqliteRow) -> AppResult<ReviewEntry> {
    let user_id: String = row.get("user_id");
    let rating: i64 = row.get("rating");
    Ok(ReviewEntry {
        rating: rating as u8,
        comment: row.get("comment"),
        user: Author {
            id: parse_uuid(&user_id)?,
            name: row.get("user_name"),
        },
    })
}
