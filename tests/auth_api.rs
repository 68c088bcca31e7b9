//! Registration, login and authentication gating.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{signup, spawn};

#[tokio::test]
async fn register_then_login_issues_usable_token() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;

    let response = app
        .server
        .get("/messages/")
        .authorization_bearer(&alice.token)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let app = spawn().await;
    signup(&app, "alice").await;

    let response = app
        .server
        .post("/register/")
        .json(&json!({ "username": "alice", "password": "otherpass" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["detail"], "Username is already taken.");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = spawn().await;
    signup(&app, "alice").await;

    let response = app
        .server
        .post("/login/")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let app = spawn().await;

    let response = app
        .server
        .post("/login/")
        .json(&json!({ "username": "nobody", "password": "password123" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = spawn().await;

    for path in ["/messages/", "/conversation/", "/profile/", "/users/"] {
        let response = app.server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let app = spawn().await;

    let response = app
        .server
        .get("/messages/")
        .authorization_bearer("not.a.real.token")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_list_excludes_the_caller() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;

    let response = app
        .server
        .get("/users/")
        .authorization_bearer(&alice.token)
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let listed: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec!["bob"]);
    assert_eq!(body[0]["id"].as_i64().unwrap(), bob.id);
}
