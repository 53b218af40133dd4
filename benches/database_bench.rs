// ABOUTME: Criterion benchmarks for recipe storage using the SQLite backend
// ABOUTME: Measures the write transaction, hydrated detail reads, the filtered listing, and view counting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for recipe storage.
//!
//! Runs against an in-memory `SQLite` database seeded with a catalogue of
//! reviewed recipes across a handful of categories.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recipebook::database::Database;
use recipebook::models::{
    Category, IngredientInput, NewReview, RecipeContent, RecipeFilter, RecipeId, User,
};
use recipebook::pagination::PageRequest;
use tokio::runtime::Runtime;
use uuid::Uuid;

const CATALOGUE_SIZE: usize = 200;

fn content(title: &str, category_id: i64, ingredients: usize, steps: usize) -> RecipeContent {
    RecipeContent {
        title: title.to_owned(),
        description: format!("Benchmark recipe {title}"),
        category_id,
        ingredients: (0..ingredients)
            .map(|n| IngredientInput {
                name: format!("ingredient {n}"),
                quantity: format!("{n}g"),
            })
            .collect(),
        steps: (0..steps).map(|n| format!("step {n}")).collect(),
    }
}

struct Catalogue {
    db: Database,
    author: User,
    categories: Vec<Category>,
    recipe_ids: Vec<RecipeId>,
}

async fn seed_catalogue() -> Catalogue {
    let db = Database::new("sqlite::memory:", 1).await.unwrap();
    db.migrate().await.unwrap();

    let author = User::new("Bench Author", "bench@example.com");
    db.users().create(&author).await.unwrap();
    let reviewers: Vec<User> = (0..5)
        .map(|n| User::new(format!("Reviewer {n}"), format!("reviewer{n}@example.com")))
        .collect();
    for reviewer in &reviewers {
        db.users().create(reviewer).await.unwrap();
    }

    let mut categories = Vec::new();
    for name in ["Soups", "Mains", "Desserts", "Breads"] {
        categories.push(db.categories().create(name).await.unwrap());
    }

    let mut recipe_ids = Vec::with_capacity(CATALOGUE_SIZE);
    for n in 0..CATALOGUE_SIZE {
        let id = RecipeId::from_uuid(Uuid::new_v4());
        let category = &categories[n % categories.len()];
        db.recipes()
            .create(
                id,
                author.id,
                "memory://recipe/bench.png",
                &content(&format!("Recipe {n}"), category.id, 6, 5),
            )
            .await
            .unwrap();

        for (offset, reviewer) in reviewers.iter().enumerate().take(n % 4) {
            db.reviews()
                .create(&NewReview {
                    recipe_id: id,
                    user_id: reviewer.id,
                    rating: ((n + offset) % 5 + 1) as u8,
                    comment: "benchmark".to_owned(),
                })
                .await
                .unwrap();
        }
        recipe_ids.push(id);
    }

    Catalogue {
        db,
        author,
        categories,
        recipe_ids,
    }
}

/// Benchmark the all-or-nothing create transaction
fn bench_recipe_create(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_create");
    let catalogue = rt.block_on(seed_catalogue());
    let category_id = catalogue.categories[0].id;

    for size in [1_usize, 10, 50] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("children", size), &size, |b, &size| {
            let recipe = content("Bench", category_id, size, size);
            b.iter(|| {
                let id = RecipeId::from_uuid(Uuid::new_v4());
                rt.block_on(async {
                    catalogue
                        .db
                        .recipes()
                        .create(id, catalogue.author.id, "memory://recipe/bench.png", black_box(&recipe))
                        .await
                })
            });
        });
    }

    group.finish();
}

/// Benchmark hydrated detail reads and the view counter
fn bench_recipe_detail(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_detail");
    let catalogue = rt.block_on(seed_catalogue());

    group.bench_function("detail", |b| {
        let mut index = 0;
        b.iter(|| {
            let id = catalogue.recipe_ids[index % catalogue.recipe_ids.len()];
            index += 1;
            rt.block_on(async { catalogue.db.recipes().detail(black_box(id)).await })
        });
    });

    group.bench_function("increment_views", |b| {
        let id = catalogue.recipe_ids[0];
        b.iter(|| rt.block_on(async { catalogue.db.recipes().increment_views(black_box(id)).await }));
    });

    group.finish();
}

/// Benchmark the grouped listing query under different filters
fn bench_recipe_listing(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("recipe_listing");
    let catalogue = rt.block_on(seed_catalogue());

    let filters = [
        ("unfiltered", RecipeFilter::default()),
        (
            "category",
            RecipeFilter {
                categories: vec![catalogue.categories[0].id, catalogue.categories[2].id],
                ..RecipeFilter::default()
            },
        ),
        (
            "rating",
            RecipeFilter {
                min_rating: Some(3.0),
                ..RecipeFilter::default()
            },
        ),
        (
            "title",
            RecipeFilter {
                title: Some("Recipe 1".to_owned()),
                ..RecipeFilter::default()
            },
        ),
    ];

    for (name, filter) in &filters {
        group.bench_with_input(BenchmarkId::new("page_1", name), filter, |b, filter| {
            b.iter(|| {
                rt.block_on(async {
                    catalogue
                        .db
                        .recipes()
                        .list(black_box(filter), PageRequest::recipes(1))
                        .await
                })
            });
        });
    }

    group.bench_function("deep_page", |b| {
        b.iter(|| {
            rt.block_on(async {
                catalogue
                    .db
                    .recipes()
                    .list(&RecipeFilter::default(), black_box(PageRequest::recipes(30)))
                    .await
            })
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_recipe_create,
    bench_recipe_detail,
    bench_recipe_listing,
);
criterion_main!(benches);
