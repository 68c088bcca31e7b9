//! Profile retrieval and update, including the username cascade.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::{signup, spawn};

#[tokio::test]
async fn profile_exists_after_registration_and_stays_single_row() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;

    let first: Value = app
        .server
        .get("/profile/")
        .authorization_bearer(&alice.token)
        .await
        .json();
    let second: Value = app
        .server
        .get("/profile/")
        .authorization_bearer(&alice.token)
        .await
        .json();

    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["username"], "alice");
    assert_eq!(first["about"], Value::Null);
    assert_eq!(first["profile_pic"], Value::Null);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles WHERE user_id = ?")
        .bind(alice.id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn update_sets_about_and_picture() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;

    let part = Part::bytes(b"jpeg bytes".to_vec()).file_name("me.jpg");
    let form = MultipartForm::new()
        .add_text("about", "hello there")
        .add_part("profile_pic", part);

    let response = app
        .server
        .put("/profile/")
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["about"], "hello there");
    let pic_ref = body["profile_pic"].as_str().unwrap();
    assert!(pic_ref.starts_with("profile_pics/"));

    // Partial update: changing nothing keeps both fields.
    let response = app
        .server
        .put("/profile/")
        .authorization_bearer(&alice.token)
        .multipart(MultipartForm::new())
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["about"], "hello there");
    assert_eq!(body["profile_pic"], pic_ref);
}

#[tokio::test]
async fn username_change_cascades_to_message_decoration() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;

    let form = MultipartForm::new()
        .add_text("receiver", bob.id.to_string())
        .add_text("text", "hi");
    app.server
        .post("/messages/")
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await
        .assert_status(StatusCode::CREATED);

    let form = MultipartForm::new().add_text("username", "alicia");
    let response = app
        .server
        .put("/profile/")
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["username"], "alicia");

    // The old token still works: identity is the id, not the name.
    let response = app
        .server
        .get("/messages/")
        .authorization_bearer(&alice.token)
        .await;
    response.assert_status_ok();
    let inbox: Value = response.json();
    assert_eq!(inbox[0]["sender_username"], "alicia");
}

#[tokio::test]
async fn renaming_to_a_taken_username_is_rejected() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;
    signup(&app, "bob").await;

    let form = MultipartForm::new().add_text("username", "bob");
    let response = app
        .server
        .put("/profile/")
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["detail"], "Username is already taken.");
}
