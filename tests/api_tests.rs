mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{test_server, test_server_with_auth, TEST_SECRET};
use serde_json::{json, Value};

async fn register_and_sign_in(server: &axum_test::TestServer) -> String {
    let signup = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "correct horse battery staple"
        }))
        .await;
    assert_eq!(signup.status_code(), StatusCode::CREATED);

    let signin = server
        .post("/api/auth/signin")
        .json(&json!({
            "username": "alice",
            "password": "correct horse battery staple"
        }))
        .await;
    assert_eq!(signin.status_code(), StatusCode::OK);

    let body: Value = signin.json();
    body["jwt"].as_str().expect("jwt present").to_string()
}

fn sample_recipe(name: &str) -> Value {
    json!({
        "name": name,
        "vegetarian": true,
        "servingCapacity": 4,
        "ingredients": [
            { "name": "Red lentils", "quantity": 250.0 },
            { "name": "Onion", "quantity": 1.0 }
        ],
        "cookingInstructions": "Soften the onion, add lentils, simmer 25 minutes."
    })
}

// ============= Auth =============

#[tokio::test]
async fn signup_returns_created_with_message() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "pw-123456"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "User registered successfully!");
}

#[tokio::test]
async fn signup_duplicate_username_conflicts() {
    let (server, _dir) = test_server().await;

    let first = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "pw-123456"
        }))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "pw-123456"
        }))
        .await;

    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    let body: Value = second.json();
    assert_eq!(body["message"], "Username is already in use: alice");
}

#[tokio::test]
async fn signup_duplicate_email_conflicts() {
    let (server, _dir) = test_server().await;

    server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "pw-123456"
        }))
        .await;

    let second = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "bob",
            "email": "alice@example.com",
            "password": "pw-123456"
        }))
        .await;

    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    let body: Value = second.json();
    assert_eq!(body["message"], "Email is already in use: alice@example.com");
}

#[tokio::test]
async fn signup_validation_failure_lists_violations() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "   ",
            "email": "not-an-email",
            "password": "pw-123456"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Validation failed!");

    let violations = body["violations"].as_array().expect("violations present");
    let fields: Vec<&str> = violations
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["username", "email"]);
}

#[tokio::test]
async fn signin_returns_token() {
    let (server, _dir) = test_server().await;
    let token = register_and_sign_in(&server).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn signin_bad_credentials_are_indistinguishable() {
    let (server, _dir) = test_server().await;
    register_and_sign_in(&server).await;

    let wrong_password = server
        .post("/api/auth/signin")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    let unknown_user = server
        .post("/api/auth/signin")
        .json(&json!({ "username": "mallory", "password": "wrong" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);

    let body_a: Value = wrong_password.json();
    let body_b: Value = unknown_user.json();
    // No username-enumeration signal
    assert_eq!(body_a["message"], body_b["message"]);
}

// ============= Auth middleware =============

#[tokio::test]
async fn recipes_require_bearer_token() {
    let (server, _dir) = test_server().await;

    let missing = server.get("/api/recipes").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

    let wrong_scheme = server
        .get("/api/recipes")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_static("Token abc"),
        )
        .await;
    assert_eq!(wrong_scheme.status_code(), StatusCode::UNAUTHORIZED);

    let garbage = server
        .get("/api/recipes")
        .authorization_bearer("not.a.token")
        .await;
    assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() {
    let (server_a, _dir_a) = test_server().await;
    let (server_b, _dir_b) =
        test_server_with_auth("another-secret-that-is-32-chars-long", 3_600_000).await;

    let token = register_and_sign_in(&server_a).await;

    let response = server_b
        .get("/api/recipes")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid token signature");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    // 1ms TTL: expiry truncates to the issuing second
    let (server, _dir) = test_server_with_auth(TEST_SECRET, 1).await;
    let token = register_and_sign_in(&server).await;

    tokio::time::sleep(std::time::Duration::from_millis(1600)).await;

    let response = server
        .get("/api/recipes")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["message"], "Token has expired");
}

// ============= Recipe CRUD =============

#[tokio::test]
async fn empty_store_list_is_not_found() {
    let (server, _dir) = test_server().await;
    let token = register_and_sign_in(&server).await;

    let response = server
        .get("/api/recipes")
        .authorization_bearer(&token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "No recipes found!");
}

#[tokio::test]
async fn recipe_validation_failure_lists_violations() {
    let (server, _dir) = test_server().await;
    let token = register_and_sign_in(&server).await;

    let response = server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&json!({
            "name": "",
            "vegetarian": false,
            "servingCapacity": 0,
            "ingredients": [],
            "cookingInstructions": ""
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let fields: Vec<&str> = body["violations"]
        .as_array()
        .expect("violations present")
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["name", "servingCapacity", "ingredients", "cookingInstructions"]
    );
}

#[tokio::test]
async fn full_crud_flow() {
    let (server, _dir) = test_server().await;
    let token = register_and_sign_in(&server).await;

    // Create
    let created = server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&sample_recipe("Lentil Soup"))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);

    let recipe: Value = created.json();
    let id = recipe["id"].as_i64().expect("generated id");
    assert!(id >= 1);
    assert_eq!(recipe["name"], "Lentil Soup");
    assert_eq!(recipe["vegetarian"], true);
    assert_eq!(recipe["servingCapacity"], 4);
    assert_eq!(recipe["ingredients"].as_array().unwrap().len(), 2);
    assert_eq!(recipe["ingredients"][0]["name"], "Red lentils");
    assert_eq!(recipe["ingredients"][1]["name"], "Onion");

    // creationTime formatted as "dd-MM-yyyy HH:mm"
    let creation_time = recipe["creationTime"].as_str().unwrap().to_string();
    assert_eq!(creation_time.len(), 16);
    assert_eq!(&creation_time[2..3], "-");
    assert_eq!(&creation_time[5..6], "-");
    assert_eq!(&creation_time[10..11], " ");
    assert_eq!(&creation_time[13..14], ":");

    let created_modified: DateTime<Utc> = recipe["lastModified"]
        .as_str()
        .unwrap()
        .parse()
        .expect("RFC 3339 lastModified");

    // Duplicate name conflicts regardless of other field differences
    let mut duplicate = sample_recipe("Lentil Soup");
    duplicate["vegetarian"] = json!(false);
    duplicate["servingCapacity"] = json!(2);
    let conflict = server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&duplicate)
        .await;
    assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
    let body: Value = conflict.json();
    assert_eq!(body["message"], "Recipe already exists with name: Lentil Soup");

    // Get by id returns the created recipe
    let fetched = server
        .get(&format!("/api/recipes/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    let fetched_body: Value = fetched.json();
    assert_eq!(fetched_body["name"], recipe["name"]);
    assert_eq!(fetched_body["creationTime"], recipe["creationTime"]);

    // List holds exactly one element
    let listed = server
        .get("/api/recipes")
        .authorization_bearer(&token)
        .await;
    assert_eq!(listed.status_code(), StatusCode::OK);
    assert_eq!(listed.json::<Value>().as_array().unwrap().len(), 1);

    // Update: mutate fields and replace the ingredient list wholesale
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let updated = server
        .put(&format!("/api/recipes/{}", id))
        .authorization_bearer(&token)
        .json(&json!({
            "name": "Spicy Lentil Soup",
            "vegetarian": false,
            "servingCapacity": 6,
            "ingredients": [
                { "name": "Red lentils", "quantity": 300.0 },
                { "name": "Chorizo", "quantity": 120.5 },
                { "name": "Chili flakes", "quantity": 0.5 }
            ],
            "cookingInstructions": "Brown the chorizo first, then proceed as before."
        }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);

    let updated_body: Value = updated.json();
    assert_eq!(updated_body["id"], id);
    assert_eq!(updated_body["name"], "Spicy Lentil Soup");
    assert_eq!(updated_body["vegetarian"], false);
    assert_eq!(updated_body["servingCapacity"], 6);
    assert_eq!(updated_body["ingredients"].as_array().unwrap().len(), 3);
    assert_eq!(updated_body["ingredients"][1]["name"], "Chorizo");

    // creationTime untouched, lastModified strictly later
    assert_eq!(updated_body["creationTime"].as_str().unwrap(), creation_time);
    let updated_modified: DateTime<Utc> = updated_body["lastModified"]
        .as_str()
        .unwrap()
        .parse()
        .expect("RFC 3339 lastModified");
    assert!(updated_modified > created_modified);

    // Delete, then every lookup misses
    let deleted = server
        .delete(&format!("/api/recipes/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let gone = server
        .get(&format!("/api/recipes/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
    let gone_body: Value = gone.json();
    assert_eq!(gone_body["message"], format!("Invalid recipe id : {}", id));

    let empty_list = server
        .get("/api/recipes")
        .authorization_bearer(&token)
        .await;
    assert_eq!(empty_list.status_code(), StatusCode::NOT_FOUND);

    let delete_again = server
        .delete(&format!("/api/recipes/{}", id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(delete_again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_missing_recipe_is_not_found() {
    let (server, _dir) = test_server().await;
    let token = register_and_sign_in(&server).await;

    let response = server
        .put("/api/recipes/9999")
        .authorization_bearer(&token)
        .json(&sample_recipe("Anything"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_keeping_own_name_succeeds() {
    let (server, _dir) = test_server().await;
    let token = register_and_sign_in(&server).await;

    let created = server
        .post("/api/recipes")
        .authorization_bearer(&token)
        .json(&sample_recipe("Lentil Soup"))
        .await;
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    // Same name on the same row must not trip the uniqueness constraint
    let mut update = sample_recipe("Lentil Soup");
    update["servingCapacity"] = json!(8);
    let response = server
        .put(&format!("/api/recipes/{}", id))
        .authorization_bearer(&token)
        .json(&update)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["servingCapacity"], 8);
}
