// ABOUTME: HTTP-level tests for the recipe API driven through the assembled router
// ABOUTME: Exercises status codes, identity handling, listing filters, and JSON shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use recipebook::config::ServerConfig;
use recipebook::database::Database;
use recipebook::identity::HeaderIdentityProvider;
use recipebook::models::{Category, User};
use recipebook::resources::ServerResources;
use recipebook::server::build_router;
use recipebook::storage::MemoryObjectStore;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{create_test_category, create_test_database, create_test_user, PNG_BYTES};
use helpers::axum_test::AxumTestRequest;

struct TestApp {
    database: Database,
    router: Router,
    author: User,
    soups: Category,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_config(ServerConfig::default()).await
    }

    async fn with_config(config: ServerConfig) -> Self {
        let database = create_test_database().await;
        let author = create_test_user(&database, "Alice").await;
        let soups = create_test_category(&database, "Soups").await;

        let resources = ServerResources::new(
            database.clone(),
            Arc::new(MemoryObjectStore::new()),
            Arc::new(HeaderIdentityProvider::default()),
            Arc::new(config),
        );

        Self {
            database,
            router: build_router(Arc::new(resources)),
            author,
            soups,
        }
    }

    fn router(&self) -> Router {
        self.router.clone()
    }

    fn create_body(&self, title: &str) -> Value {
        json!({
            "title": title,
            "description": "Warm and simple",
            "category": self.soups.id,
            "image": STANDARD.encode(PNG_BYTES),
            "image_content_type": "image/png",
            "ingredients": [{"name": "Salt", "quantity": "1tsp"}],
            "steps": ["Boil water", "Add salt"]
        })
    }

    async fn publish(&self, title: &str) -> String {
        let response = AxumTestRequest::post("/api/recipes")
            .as_user(self.author.id)
            .json(&self.create_body(title))
            .send(self.router())
            .await
            .assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["id"].as_str().unwrap().to_owned()
    }
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = TestApp::new().await;

    let health: Value = AxumTestRequest::get("/health")
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(health["status"], "healthy");

    let ready: Value = AxumTestRequest::get("/ready")
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(ready["status"], "ready");
}

#[tokio::test]
async fn test_create_then_show_soup() {
    let app = TestApp::new().await;
    let id = app.publish("Soup").await;

    let detail: Value = AxumTestRequest::get(&format!("/api/recipes/{id}"))
        .as_user(app.author.id)
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(detail["id"], id.as_str());
    assert_eq!(detail["title"], "Soup");
    assert_eq!(detail["author"]["name"], "Alice");
    assert_eq!(detail["ingredients"], json!([{"name": "Salt", "quantity": "1tsp"}]));
    assert_eq!(
        detail["steps"],
        json!([
            {"step_number": 1, "description": "Boil water"},
            {"step_number": 2, "description": "Add salt"}
        ])
    );
    assert_eq!(detail["reviews"], json!([]));
    assert_eq!(detail["views"], 0);
    assert_eq!(detail["is_owner"], true);
    assert!(detail["image"].as_str().unwrap().starts_with("memory://recipe/"));
}

#[tokio::test]
async fn test_show_for_other_viewers_is_not_owner_and_counts_views() {
    let app = TestApp::new().await;
    let id = app.publish("Soup").await;
    let uri = format!("/api/recipes/{id}");

    let anonymous: Value = AxumTestRequest::get(&uri).send(app.router()).await.json();
    assert_eq!(anonymous["is_owner"], false);
    assert_eq!(anonymous["views"], 0);

    let stranger: Value = AxumTestRequest::get(&uri)
        .as_user(Uuid::new_v4())
        .send(app.router())
        .await
        .json();
    assert_eq!(stranger["is_owner"], false);
    assert_eq!(stranger["views"], 1);
}

#[tokio::test]
async fn test_writes_require_identity() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::post("/api/recipes")
        .json(&app.create_body("Soup"))
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "AUTH_REQUIRED");

    let response = AxumTestRequest::post("/api/recipes")
        .header("x-user-id", "not-a-uuid")
        .json(&app.create_body("Soup"))
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "AUTH_REQUIRED");

    let id = app.publish("Soup").await;
    AxumTestRequest::put(&format!("/api/recipes/{id}"))
        .json(&app.create_body("Changed"))
        .send(app.router())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(app.database.recipes().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_base64_image_is_bad_request() {
    let app = TestApp::new().await;
    let mut body = app.create_body("Soup");
    body["image"] = json!("%%% not base64 %%%");

    let response = AxumTestRequest::post("/api/recipes")
        .as_user(app.author.id)
        .json(&body)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_INPUT");
    assert_eq!(app.database.recipes().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_image_is_storage_failure() {
    let app = TestApp::new().await;
    let mut body = app.create_body("Soup");
    body["image"] = json!("");

    let response = AxumTestRequest::post("/api/recipes")
        .as_user(app.author.id)
        .json(&body)
        .send(app.router())
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.error_code(), "STORAGE_ERROR");
    assert_eq!(app.database.recipes().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_category_is_server_error_and_writes_nothing() {
    let app = TestApp::new().await;
    let mut body = app.create_body("Soup");
    body["category"] = json!(9999);

    let response = AxumTestRequest::post("/api/recipes")
        .as_user(app.author.id)
        .json(&body)
        .send(app.router())
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_code(), "DATABASE_ERROR");
    assert_eq!(app.database.recipes().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_replaces_content() {
    let app = TestApp::new().await;
    let id = app.publish("Soup").await;

    AxumTestRequest::put(&format!("/api/recipes/{id}"))
        .as_user(app.author.id)
        .json(&json!({
            "title": "Pepper Soup",
            "description": "Spicier",
            "category_id": app.soups.id,
            "ingredients": [{"name": "Pepper", "quantity": "a pinch"}],
            "steps": ["Grind pepper"]
        }))
        .send(app.router())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let edit: Value = AxumTestRequest::get(&format!("/api/recipes/{id}/edit"))
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(edit["title"], "Pepper Soup");
    assert_eq!(edit["ingredients"], json!([{"name": "Pepper", "quantity": "a pinch"}]));
    assert_eq!(
        edit["steps"],
        json!([{"step_number": 1, "description": "Grind pepper"}])
    );
    assert_eq!(edit["categories"][0]["name"], "Soups");
    // The edit screen does not count as a view
    assert_eq!(edit["views"], 0);
}

#[tokio::test]
async fn test_missing_and_malformed_ids_are_not_found() {
    let app = TestApp::new().await;

    for uri in [
        format!("/api/recipes/{}", Uuid::new_v4()),
        "/api/recipes/not-a-recipe".to_owned(),
        "/api/recipes/not-a-recipe/edit".to_owned(),
    ] {
        let response = AxumTestRequest::get(&uri)
            .send(app.router())
            .await
            .assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.error_code(), "RESOURCE_NOT_FOUND");
    }

    AxumTestRequest::put(&format!("/api/recipes/{}", Uuid::new_v4()))
        .as_user(app.author.id)
        .json(&app.create_body("Ghost"))
        .send(app.router())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_pages_and_filters() {
    let app = TestApp::new().await;
    let mains = create_test_category(&app.database, "Mains").await;
    for n in 1..=6 {
        app.publish(&format!("Soup {n}")).await;
    }
    let mut roast = app.create_body("Roast");
    roast["category"] = json!(mains.id);
    AxumTestRequest::post("/api/recipes")
        .as_user(app.author.id)
        .json(&roast)
        .send(app.router())
        .await
        .assert_status(StatusCode::CREATED);

    let first: Value = AxumTestRequest::get("/api/recipes")
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(first["recipes"].as_array().unwrap().len(), 5);
    assert_eq!(first["recipes"][0]["title"], "Roast");
    assert_eq!(first["recipes"][0]["author_name"], "Alice");
    assert_eq!(first["recipes"][0]["average_rating"], Value::Null);
    assert_eq!(first["page"], 1);
    assert_eq!(first["per_page"], 5);
    assert_eq!(first["total"], 7);
    assert_eq!(first["has_more"], true);
    assert_eq!(first["last_page"], 2);

    let second: Value = AxumTestRequest::get("/api/recipes?page=2")
        .send(app.router())
        .await
        .json();
    assert_eq!(second["recipes"].as_array().unwrap().len(), 2);
    assert_eq!(second["has_more"], false);

    let by_category: Value = AxumTestRequest::get(&format!("/api/recipes?categories={}", mains.id))
        .send(app.router())
        .await
        .json();
    assert_eq!(by_category["total"], 1);

    let bracketed: Value = AxumTestRequest::get(&format!(
        "/api/recipes?categories%5B%5D={}&categories%5B%5D={}",
        mains.id, app.soups.id
    ))
    .send(app.router())
    .await
    .json();
    assert_eq!(bracketed["total"], 7);

    let by_title: Value = AxumTestRequest::get("/api/recipes?title=soup%203")
        .send(app.router())
        .await
        .json();
    assert_eq!(by_title["total"], 1);
    assert_eq!(by_title["recipes"][0]["title"], "Soup 3");

    let rated: Value = AxumTestRequest::get("/api/recipes?rating=4")
        .send(app.router())
        .await
        .json();
    assert_eq!(rated["total"], 0);

    let blank: Value = AxumTestRequest::get("/api/recipes?rating=&title=&page=")
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(blank["total"], 7);
}

#[tokio::test]
async fn test_malformed_listing_filters_are_bad_request() {
    let app = TestApp::new().await;

    let soups = app.soups.id;
    let repeated_keys = [
        format!("categories={soups}&categories%5B%5D={soups}"),
        "rating=4&rating=5".to_owned(),
    ];
    let queries = ["rating=great", "rating=6", "categories=soup", "page=0", "page=-2"]
        .map(str::to_owned)
        .into_iter()
        .chain(repeated_keys);

    for query in queries {
        let response = AxumTestRequest::get(&format!("/api/recipes?{query}"))
            .send(app.router())
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_FILTER", "query {query}");
    }
}

#[tokio::test]
async fn test_home_and_categories() {
    let app = TestApp::new().await;
    for n in 1..=4 {
        app.publish(&format!("Soup {n}")).await;
    }

    let home: Value = AxumTestRequest::get("/api/home")
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(home["latest"].as_array().unwrap().len(), 3);
    assert_eq!(home["latest"][0]["title"], "Soup 4");
    assert_eq!(home["popular"].as_array().unwrap().len(), 2);

    let categories: Value = AxumTestRequest::get("/api/categories")
        .send(app.router())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(categories["categories"][0]["name"], "Soups");
    assert_eq!(categories["categories"][0]["id"], app.soups.id);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let config = ServerConfig {
        max_upload_bytes: 256,
        ..ServerConfig::default()
    };
    let app = TestApp::with_config(config).await;

    let mut body = app.create_body("Huge");
    body["image"] = json!(STANDARD.encode(vec![0_u8; 1024]));

    AxumTestRequest::post("/api/recipes")
        .as_user(app.author.id)
        .json(&body)
        .send(app.router())
        .await
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.database.recipes().count().await.unwrap(), 0);
}
