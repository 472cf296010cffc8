//! HTTP-level integration tests for the character CRUD endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. Requests that must observe each
//! other's writes share one in-memory store across app builds.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use holocron_store::MemoryStore;

fn luke() -> serde_json::Value {
    serde_json::json!({
        "name": "Luke Skywalker",
        "episodes": ["NEWHOPE", "EMPIRE", "JEDI"],
        "planet": "Tatooine"
    })
}

/// Create a character through the API and return its assigned id.
async fn create_character(store: &Arc<MemoryStore>, body: serde_json::Value) -> String {
    let app = common::build_app_with_store(store.clone());
    let response = post_json(app, "/api/v1/characters", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_character_returns_201() {
    let app = common::build_test_app();
    let response = post_json(app, "/api/v1/characters", luke()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Luke Skywalker");
    assert_eq!(json["episodes"].as_array().unwrap().len(), 3);
    assert_eq!(json["planet"], "Tatooine");

    // The id is assigned server-side as a 36-character UUID string.
    let id = json["id"].as_str().unwrap();
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_create_without_planet_omits_the_field() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({"name": "R2-D2", "episodes": ["NEWHOPE"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(
        json.get("planet").is_none(),
        "absent planet must be omitted, not null"
    );
}

#[tokio::test]
async fn test_create_ignores_caller_supplied_id() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({
            "id": "my-chosen-id",
            "name": "Boba Fett",
            "episodes": ["EMPIRE"]
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_ne!(json["id"], "my-chosen-id");
}

#[tokio::test]
async fn test_create_without_name_returns_400() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({"episodes": ["NEWHOPE"]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_with_empty_episodes_returns_400() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/characters",
        serde_json::json!({"name": "Luke Skywalker", "episodes": []}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_get_character_by_id() {
    let store = Arc::new(MemoryStore::new());
    let id = create_character(&store, luke()).await;

    let app = common::build_app_with_store(store);
    let response = get(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id.as_str());
    assert_eq!(json["name"], "Luke Skywalker");
}

#[tokio::test]
async fn test_get_nonexistent_character_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/characters/definitely-missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    // The message names the id that was asked for.
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("definitely-missing"));
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_returns_characters_without_cursor_when_short() {
    let store = Arc::new(MemoryStore::new());
    create_character(&store, luke()).await;

    let app = common::build_app_with_store(store);
    let response = get(app, "/api/v1/characters").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["characters"].as_array().unwrap().len(), 1);
    // Fewer records than the default page size: no cursor.
    assert!(json.get("lastKey").is_none());
}

#[tokio::test]
async fn test_list_paginates_with_last_key() {
    let store = Arc::new(MemoryStore::new());
    for n in 0..5 {
        create_character(
            &store,
            serde_json::json!({"name": format!("Character {n}"), "episodes": ["NEWHOPE"]}),
        )
        .await;
    }

    let mut seen: Vec<String> = Vec::new();
    let mut uri = "/api/v1/characters?limit=2".to_string();
    loop {
        let app = common::build_app_with_store(store.clone());
        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        let page = json["characters"].as_array().unwrap();
        assert!(page.len() <= 2);
        seen.extend(
            page.iter()
                .map(|c| c["id"].as_str().unwrap().to_string()),
        );

        match json.get("lastKey") {
            Some(key) => {
                uri = format!("/api/v1/characters?limit=2&lastKey={}", key.as_str().unwrap());
            }
            None => break,
        }
    }

    // Every record seen exactly once across the pages.
    assert_eq!(seen.len(), 5);
    let mut deduped = seen.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 5, "pages overlapped");
}

#[tokio::test]
async fn test_list_clamps_out_of_range_limits() {
    let store = Arc::new(MemoryStore::new());
    for n in 0..3 {
        create_character(
            &store,
            serde_json::json!({"name": format!("Character {n}"), "episodes": ["NEWHOPE"]}),
        )
        .await;
    }

    // A non-positive limit is floored to 1 rather than rejected.
    let app = common::build_app_with_store(store.clone());
    let response = get(app, "/api/v1/characters?limit=0").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["characters"].as_array().unwrap().len(), 1);

    // An oversized limit is capped, not an error.
    let app = common::build_app_with_store(store);
    let response = get(app, "/api/v1/characters?limit=100000").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["characters"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_overwrites_all_fields() {
    let store = Arc::new(MemoryStore::new());
    let id = create_character(&store, luke()).await;

    // The patch carries only a name; episodes and planet are cleared.
    let app = common::build_app_with_store(store.clone());
    let response = put_json(
        app,
        &format!("/api/v1/characters/{id}"),
        serde_json::json!({"name": "Luke"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Luke");
    assert_eq!(json["episodes"].as_array().unwrap().len(), 0);
    assert!(json.get("planet").is_none());

    // The overwrite is persisted, not just echoed.
    let app = common::build_app_with_store(store);
    let response = get(app, &format!("/api/v1/characters/{id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["name"], "Luke");
    assert_eq!(json["episodes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_update_with_full_body_replaces_the_record() {
    let store = Arc::new(MemoryStore::new());
    let id = create_character(&store, luke()).await;

    let app = common::build_app_with_store(store);
    let response = put_json(
        app,
        &format!("/api/v1/characters/{id}"),
        serde_json::json!({
            "name": "Luke Skywalker",
            "episodes": ["JEDI"],
            "planet": "Ahch-To"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["episodes"].as_array().unwrap().len(), 1);
    assert_eq!(json["planet"], "Ahch-To");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_character_returns_204_then_404() {
    let store = Arc::new(MemoryStore::new());
    let id = create_character(&store, luke()).await;

    let app = common::build_app_with_store(store.clone());
    let response = delete(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_app_with_store(store.clone());
    let response = get(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again reports the absence.
    let app = common::build_app_with_store(store);
    let response = delete(app, &format!("/api/v1/characters/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Storage faults
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_store_fault_returns_500_with_stable_message() {
    let app = common::build_app_with_store(Arc::new(common::FailingStore));
    let response = post_json(app, "/api/v1/characters", luke()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_ERROR");
    assert_eq!(json["error"], "error creating character");

    let app = common::build_app_with_store(Arc::new(common::FailingStore));
    let response = get(app, "/api/v1/characters/some-id").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "error fetching character");

    // The raw store fault never reaches the body.
    assert!(!json.to_string().contains("connection reset"));
}
