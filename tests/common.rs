// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides an in-memory catalogue database plus user, category, and recipe fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `recipebook`

use std::sync::{Arc, Once};

use recipebook::database::Database;
use recipebook::models::{Category, IngredientInput, RecipeContent, RecipeId, User};
use recipebook::services::{NewRecipe, RecipeService};
use recipebook::storage::{ImageUpload, MemoryObjectStore};
use sqlx::sqlite::SqlitePoolOptions;

static INIT_LOGGER: Once = Once::new();

/// Tiny but valid PNG signature used wherever a test needs image bytes
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh, migrated in-memory database on a single connection
pub async fn create_test_database() -> Database {
    init_test_logging();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test pool");

    let database = Database::from_pool(pool);
    database.migrate().await.expect("Failed to migrate test database");
    database
}

/// Store a user with a unique email
pub async fn create_test_user(database: &Database, name: &str) -> User {
    let user = User::new(
        name,
        format!("{}+{}@example.com", name.to_lowercase(), uuid::Uuid::new_v4()),
    );
    database.users().create(&user).await.unwrap();
    user
}

/// Store (or look up) a category by name
pub async fn create_test_category(database: &Database, name: &str) -> Category {
    database.categories().create(name).await.unwrap()
}

/// Recipe content with `ingredients` generic ingredients and `steps` steps
pub fn sample_content(title: &str, category_id: i64, ingredients: usize, steps: usize) -> RecipeContent {
    RecipeContent {
        title: title.to_owned(),
        description: format!("How to make {title}"),
        category_id,
        ingredients: (1..=ingredients)
            .map(|n| IngredientInput {
                name: format!("ingredient {n}"),
                quantity: format!("{n} cup"),
            })
            .collect(),
        steps: (1..=steps).map(|n| format!("step {n}")).collect(),
    }
}

/// Create payload wrapping `content` with a PNG image
pub fn sample_new_recipe(content: RecipeContent) -> NewRecipe {
    NewRecipe {
        content,
        image: ImageUpload::new(PNG_BYTES.to_vec(), Some("image/png".to_owned())),
    }
}

/// Service over `database` with an in-memory object store
pub fn test_service(database: &Database) -> (RecipeService, Arc<MemoryObjectStore>) {
    let store = Arc::new(MemoryObjectStore::new());
    let service = RecipeService::new(database.clone(), store.clone());
    (service, store)
}

/// Write a recipe straight through the storage layer
pub async fn insert_recipe(
    database: &Database,
    author: &User,
    content: &RecipeContent,
) -> RecipeId {
    let id = RecipeId::from_uuid(uuid::Uuid::new_v4());
    database
        .recipes()
        .create(id, author.id, "memory://recipe/test.png", content)
        .await
        .unwrap();
    id
}

/// Count rows in `table`, optionally limited to one recipe
pub async fn count_rows(database: &Database, table: &str, recipe_id: Option<RecipeId>) -> i64 {
    let column = if table == "recipes" { "id" } else { "recipe_id" };
    match recipe_id {
        Some(id) => sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE {column} = $1"))
            .bind(id.to_string())
            .fetch_one(database.pool())
            .await
            .unwrap(),
        None => sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(database.pool())
            .await
            .unwrap(),
    }
}
