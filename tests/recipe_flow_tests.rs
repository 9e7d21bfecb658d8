use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use simmer::config::Config;
use tower::ServiceExt;

/// Default API key seeded by migration (must match m20240210_seed_admin.rs)
const DEFAULT_API_KEY: &str = "simmer_default_api_key_please_regenerate";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = simmer::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    simmer::api::router(state).await
}

fn get(uri: &str, api_key: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("X-Api-Key", api_key)
        .body(Body::empty())
        .unwrap()
}

fn request_json(
    method: &str,
    uri: &str,
    api_key: &str,
    body: &serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Api-Key", api_key)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn delete(uri: &str, api_key: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("X-Api-Key", api_key)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_recipe() -> serde_json::Value {
    serde_json::json!({
        "name": "Shakshuka",
        "time_to_cook_hrs": 0,
        "time_to_cook_mins": 35,
        "method": "Simmer tomatoes, crack in the eggs",
        "is_vegetarian": true,
        "ingredients": [
            {"name": "Eggs", "quantity": 4.0, "unit": "whole"},
            {"name": "Chopped tomatoes", "quantity": 400.0, "unit": "g"},
        ],
    })
}

async fn create_recipe(app: &Router, api_key: &str, body: &serde_json::Value) -> i64 {
    let response = app
        .clone()
        .oneshot(request_json("POST", "/api/recipe", api_key, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Registers a second user and returns their API key.
async fn signup(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/signup")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::json!({"username": username, "password": "longenough"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["data"]["api_key"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_create_list_and_detail() {
    let app = spawn_app().await;

    let id = create_recipe(&app, DEFAULT_API_KEY, &sample_recipe()).await;

    let response = app
        .clone()
        .oneshot(get("/api/recipe", DEFAULT_API_KEY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(response).await;
    assert_eq!(list["data"][0]["name"], "Shakshuka");
    assert_eq!(list["data"][0]["time_to_cook"], "35 mins");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/recipe/{id}"), DEFAULT_API_KEY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("Last-Modified"));

    let detail = body_json(response).await;
    assert_eq!(detail["data"]["name"], "Shakshuka");
    assert_eq!(detail["data"]["ingredients"][0]["quantity"], "4 whole");
    assert_eq!(detail["data"]["created_by_id"], 1);
}

#[tokio::test]
async fn test_create_validation() {
    let app = spawn_app().await;

    // No cook time at all
    let mut recipe = sample_recipe();
    recipe["time_to_cook_hrs"] = serde_json::json!(0);
    recipe["time_to_cook_mins"] = serde_json::json!(0);

    let response = app
        .clone()
        .oneshot(request_json("POST", "/api/recipe", DEFAULT_API_KEY, &recipe))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Time to cook should be filled");

    // Empty name
    let mut recipe = sample_recipe();
    recipe["name"] = serde_json::json!("");
    let response = app
        .clone()
        .oneshot(request_json("POST", "/api/recipe", DEFAULT_API_KEY, &recipe))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Zero ingredient quantity
    let mut recipe = sample_recipe();
    recipe["ingredients"][0]["quantity"] = serde_json::json!(0.0);
    let response = app
        .clone()
        .oneshot(request_json("POST", "/api/recipe", DEFAULT_API_KEY, &recipe))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Minutes out of range
    let mut recipe = sample_recipe();
    recipe["time_to_cook_mins"] = serde_json::json!(60);
    let response = app
        .clone()
        .oneshot(request_json("POST", "/api/recipe", DEFAULT_API_KEY, &recipe))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_conditional_get() {
    let app = spawn_app().await;

    let id = create_recipe(&app, DEFAULT_API_KEY, &sample_recipe()).await;
    let uri = format!("/api/recipe/{id}");

    let response = app
        .clone()
        .oneshot(get(&uri, DEFAULT_API_KEY))
        .await
        .unwrap();
    let last_modified = response
        .headers()
        .get("Last-Modified")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    // Client cache is current
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(&uri)
                .header("X-Api-Key", DEFAULT_API_KEY)
                .header("If-Modified-Since", &last_modified)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    // Client cache is stale
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(&uri)
                .header("X-Api-Key", DEFAULT_API_KEY)
                .header("If-Modified-Since", "Mon, 01 Jan 2001 00:00:00 GMT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A garbled date falls back to a full response
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(&uri)
                .header("X-Api-Key", DEFAULT_API_KEY)
                .header("If-Modified-Since", "not a date")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Listing is not stamped and ignores the header entirely
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/recipe")
                .header("X-Api-Key", DEFAULT_API_KEY)
                .header("If-Modified-Since", &last_modified)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("Last-Modified"));
}

#[tokio::test]
async fn test_update_flow() {
    let app = spawn_app().await;

    let id = create_recipe(&app, DEFAULT_API_KEY, &sample_recipe()).await;

    // Edit view splits total time back into hours and minutes
    let response = app
        .clone()
        .oneshot(get(&format!("/api/recipe/{id}/edit"), DEFAULT_API_KEY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let edit = body_json(response).await;
    assert_eq!(edit["data"]["time_to_cook_hrs"], 0);
    assert_eq!(edit["data"]["time_to_cook_mins"], 35);

    let update = serde_json::json!({
        "name": "Shakshuka with feta",
        "time_to_cook_hrs": 1,
        "time_to_cook_mins": 0,
        "method": "As before, crumble feta at the end",
        "is_vegetarian": true,
    });

    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            &format!("/api/recipe/{id}"),
            DEFAULT_API_KEY,
            &update,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/recipe/{id}"), DEFAULT_API_KEY))
        .await
        .unwrap();
    let detail = body_json(response).await;
    assert_eq!(detail["data"]["name"], "Shakshuka with feta");
    // Ingredients and the creator survive updates untouched
    assert_eq!(detail["data"]["ingredients"].as_array().unwrap().len(), 2);
    assert_eq!(detail["data"]["created_by_id"], 1);

    // Unknown recipe
    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            "/api/recipe/999",
            DEFAULT_API_KEY,
            &update,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_and_gone() {
    let app = spawn_app().await;

    let id = create_recipe(&app, DEFAULT_API_KEY, &sample_recipe()).await;
    let uri = format!("/api/recipe/{id}");

    let response = app
        .clone()
        .oneshot(delete(&uri, DEFAULT_API_KEY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting again stays quiet
    let response = app
        .clone()
        .oneshot(delete(&uri, DEFAULT_API_KEY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Reads treat it as missing
    let response = app
        .clone()
        .oneshot(get(&uri, DEFAULT_API_KEY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Updates distinguish deleted from missing
    let update = serde_json::json!({
        "name": "Too late",
        "time_to_cook_hrs": 0,
        "time_to_cook_mins": 10,
    });
    let response = app
        .clone()
        .oneshot(request_json("POST", &uri, DEFAULT_API_KEY, &update))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::GONE);
}

#[tokio::test]
async fn test_ownership() {
    let app = spawn_app().await;

    let id = create_recipe(&app, DEFAULT_API_KEY, &sample_recipe()).await;
    let other_key = signup(&app, "rival").await;

    // Everyone may read
    let response = app
        .clone()
        .oneshot(get(&format!("/api/recipe/{id}"), &other_key))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Only the creator may change or remove
    let update = serde_json::json!({
        "name": "Hijacked",
        "time_to_cook_hrs": 0,
        "time_to_cook_mins": 5,
    });
    let response = app
        .clone()
        .oneshot(request_json(
            "POST",
            &format!("/api/recipe/{id}"),
            &other_key,
            &update,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/recipe/{id}"), &other_key))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/recipe/{id}/edit"), &other_key))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Untouched by the failed attempts
    let response = app
        .clone()
        .oneshot(get(&format!("/api/recipe/{id}"), DEFAULT_API_KEY))
        .await
        .unwrap();
    let detail = body_json(response).await;
    assert_eq!(detail["data"]["name"], "Shakshuka");
}

#[tokio::test]
async fn test_my_recipes() {
    let app = spawn_app().await;

    create_recipe(&app, DEFAULT_API_KEY, &sample_recipe()).await;
    create_recipe(&app, DEFAULT_API_KEY, &sample_recipe()).await;

    let other_key = signup(&app, "rival").await;
    let mut theirs = sample_recipe();
    theirs["name"] = serde_json::json!("Rival's stew");
    create_recipe(&app, &other_key, &theirs).await;

    let response = app
        .clone()
        .oneshot(get("/api/recipe/mine", &other_key))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let recipes = body["data"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["name"], "Rival's stew");

    let response = app
        .clone()
        .oneshot(get("/api/recipe/mine?limit=1", DEFAULT_API_KEY))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .clone()
        .oneshot(get("/api/recipe/mine?limit=0", DEFAULT_API_KEY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
