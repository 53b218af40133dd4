// ABOUTME: Demo data seeder for the recipe catalogue
// ABOUTME: Inserts users, categories, recipes through the write transaction, and reviews
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Demo data seeder for recipebook.
//!
//! Usage:
//! ```bash
//! # Seed the default database
//! cargo run --bin seed-recipes
//!
//! # Wipe recipes, reviews, users, and categories first
//! cargo run --bin seed-recipes -- --reset
//!
//! # Verbose output
//! cargo run --bin seed-recipes -- -v
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use recipebook::{
    config::database::DEFAULT_DATABASE_URL,
    database::Database,
    models::{Category, IngredientInput, NewReview, RecipeContent, RecipeId, User},
    services::{NewRecipe, RecipeService},
    storage::{ImageUpload, MemoryObjectStore},
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-recipes",
    about = "Recipebook Demo Data Seeder",
    long_about = "Populate the database with demo users, categories, recipes, and reviews"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Delete existing catalogue data before seeding
    #[arg(long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Demo user
struct DemoUser {
    name: &'static str,
    email: &'static str,
}

/// Demo recipe
struct DemoRecipe {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    author: usize,
    ingredients: &'static [(&'static str, &'static str)],
    steps: &'static [&'static str],
    reviews: &'static [(usize, u8, &'static str)],
}

const USERS: &[DemoUser] = &[
    DemoUser {
        name: "Aiko",
        email: "aiko@recipebook.example",
    },
    DemoUser {
        name: "Bram",
        email: "bram@recipebook.example",
    },
    DemoUser {
        name: "Chidi",
        email: "chidi@recipebook.example",
    },
];

const CATEGORIES: &[&str] = &["Breakfast", "Soup", "Main", "Dessert", "Salad"];

const RECIPES: &[DemoRecipe] = &[
    DemoRecipe {
        title: "Miso Soup",
        description: "Quick dashi broth with tofu and wakame",
        category: "Soup",
        author: 0,
        ingredients: &[
            ("Dashi", "600ml"),
            ("Miso paste", "3tbsp"),
            ("Silken tofu", "150g"),
            ("Wakame", "1tbsp"),
        ],
        steps: &[
            "Warm the dashi without boiling",
            "Soak the wakame for five minutes",
            "Dissolve the miso into the broth",
            "Add tofu and wakame and serve",
        ],
        reviews: &[(1, 5, "Comforting"), (2, 4, "Simple and good")],
    },
    DemoRecipe {
        title: "Overnight Oats",
        description: "No-cook oats for busy mornings",
        category: "Breakfast",
        author: 1,
        ingredients: &[("Rolled oats", "50g"), ("Milk", "150ml"), ("Honey", "1tsp")],
        steps: &["Mix everything in a jar", "Refrigerate overnight"],
        reviews: &[(0, 3, "A bit bland")],
    },
    DemoRecipe {
        title: "Tomato Salad",
        description: "Ripe tomatoes, salt, and good olive oil",
        category: "Salad",
        author: 2,
        ingredients: &[("Tomatoes", "4"), ("Salt", "1tsp"), ("Olive oil", "2tbsp")],
        steps: &["Slice the tomatoes", "Season and dress"],
        reviews: &[],
    },
    DemoRecipe {
        title: "Chocolate Mousse",
        description: "Two-ingredient airy mousse",
        category: "Dessert",
        author: 0,
        ingredients: &[("Dark chocolate", "200g"), ("Eggs", "4")],
        steps: &[
            "Melt the chocolate",
            "Separate the eggs and whisk the whites",
            "Fold yolks into chocolate, then fold in whites",
            "Chill for two hours",
        ],
        reviews: &[(1, 5, "Rich"), (2, 5, "Perfect")],
    },
    DemoRecipe {
        title: "Lentil Soup",
        description: "Red lentils with cumin and lemon",
        category: "Soup",
        author: 2,
        ingredients: &[
            ("Red lentils", "200g"),
            ("Onion", "1"),
            ("Cumin", "1tsp"),
            ("Lemon", "1/2"),
        ],
        steps: &[
            "Soften the onion",
            "Add lentils, cumin, and water",
            "Simmer for twenty minutes",
            "Blend and finish with lemon",
        ],
        reviews: &[(0, 4, "Hearty")],
    },
    DemoRecipe {
        title: "Roast Chicken",
        description: "Sunday roast with garlic and thyme",
        category: "Main",
        author: 1,
        ingredients: &[("Chicken", "1.5kg"), ("Garlic", "1 head"), ("Thyme", "4 sprigs")],
        steps: &["Season the chicken", "Roast at 200C for 80 minutes", "Rest before carving"],
        reviews: &[(0, 4, "Crispy skin"), (2, 2, "Dry for me")],
    },
];

/// Placeholder image bytes (1x1 PNG)
const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89,
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== Recipebook Demo Data Seeder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

    info!("Connecting to database: {}", database_url);
    let database = Database::new(&database_url, 1).await?;
    database.migrate().await?;

    if args.reset {
        info!("Resetting catalogue data...");
        reset_catalogue(&database).await?;
    }

    info!("Step 1: Creating users...");
    let users = seed_users(&database).await?;
    info!("  Created/found {} users", users.len());

    info!("Step 2: Creating categories...");
    let categories = seed_categories(&database).await?;
    info!("  Created/found {} categories", categories.len());

    info!("Step 3: Creating recipes...");
    let service = RecipeService::new(database.clone(), Arc::new(MemoryObjectStore::new()));
    let mut recipe_count = 0;
    let mut review_count = 0;
    for recipe in RECIPES {
        let id = seed_recipe(&service, recipe, &users, &categories).await?;
        recipe_count += 1;
        review_count += seed_reviews(&database, id, recipe, &users).await?;
    }
    info!("  Created {} recipes and {} reviews", recipe_count, review_count);
    info!("  Catalogue now holds {} recipes", database.recipes().count().await?);

    info!("=== Seeding complete ===");
    Ok(())
}

async fn reset_catalogue(database: &Database) -> Result<()> {
    for table in ["reviews", "steps", "ingredients", "recipes", "categories", "users"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(database.pool())
            .await?;
    }
    Ok(())
}

async fn seed_users(database: &Database) -> Result<Vec<User>> {
    let users = database.users();
    let mut seeded = Vec::with_capacity(USERS.len());
    for demo in USERS {
        if let Some(existing) = users.get_by_email(demo.email).await? {
            seeded.push(existing);
            continue;
        }
        let user = User::new(demo.name, demo.email);
        users.create(&user).await?;
        seeded.push(user);
    }
    Ok(seeded)
}

async fn seed_categories(database: &Database) -> Result<Vec<Category>> {
    let categories = database.categories();
    let mut seeded = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        seeded.push(categories.create(name).await?);
    }
    Ok(seeded)
}

async fn seed_recipe(
    service: &RecipeService,
    recipe: &DemoRecipe,
    users: &[User],
    categories: &[Category],
) -> Result<RecipeId> {
    let category_id = categories
        .iter()
        .find(|c| c.name == recipe.category)
        .map(|c| c.id)
        .ok_or_else(|| anyhow::anyhow!("Unknown demo category {}", recipe.category))?;
    let author = users
        .get(recipe.author)
        .ok_or_else(|| anyhow::anyhow!("Unknown demo author {}", recipe.author))?;

    let content = RecipeContent {
        title: recipe.title.to_owned(),
        description: recipe.description.to_owned(),
        category_id,
        ingredients: recipe
            .ingredients
            .iter()
            .map(|(name, quantity)| IngredientInput {
                name: (*name).to_owned(),
                quantity: (*quantity).to_owned(),
            })
            .collect(),
        steps: recipe.steps.iter().map(|s| (*s).to_owned()).collect(),
    };

    let id = service
        .create(
            author.id,
            NewRecipe {
                content,
                image: ImageUpload::new(PLACEHOLDER_PNG, Some("image/png".to_owned())),
            },
        )
        .await?;
    info!("  {} ({})", recipe.title, id);
    Ok(id)
}

async fn seed_reviews(
    database: &Database,
    recipe_id: RecipeId,
    recipe: &DemoRecipe,
    users: &[User],
) -> Result<usize> {
    let reviews = database.reviews();
    for (reviewer, rating, comment) in recipe.reviews {
        let user = users
            .get(*reviewer)
            .ok_or_else(|| anyhow::anyhow!("Unknown demo reviewer {reviewer}"))?;
        reviews
            .create(&NewReview {
                recipe_id,
                user_id: user.id,
                rating: *rating,
                comment: (*comment).to_owned(),
            })
            .await?;
    }
    Ok(recipe.reviews.len())
}
