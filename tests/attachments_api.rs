//! Attachment upload and download access rules.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::{signup, spawn, TestApp, TestUser};

async fn send_file(app: &TestApp, from: &TestUser, to: i64, name: &str, data: &[u8]) -> Value {
    let part = Part::bytes(data.to_vec())
        .file_name(name.to_string())
        .mime_type("application/octet-stream");
    let form = MultipartForm::new()
        .add_text("receiver", to.to_string())
        .add_part("file", part);

    let response = app
        .server
        .post("/messages/")
        .authorization_bearer(&from.token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn both_participants_can_download() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;

    let msg = send_file(&app, &alice, bob.id, "notes.txt", b"attachment body").await;
    let id = msg["id"].as_i64().unwrap();
    assert_eq!(
        msg["download_url"].as_str().unwrap(),
        format!("/messages/{id}/download/")
    );

    for user in [&alice, &bob] {
        let response = app
            .server
            .get(&format!("/messages/{id}/download/"))
            .authorization_bearer(&user.token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.as_bytes().to_vec(), b"attachment body".to_vec());

        let disposition = response
            .header("content-disposition")
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\""));
        assert!(disposition.ends_with("_notes.txt\""));
    }
}

#[tokio::test]
async fn download_by_stranger_is_forbidden() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;
    let carol = signup(&app, "carol").await;

    let msg = send_file(&app, &alice, bob.id, "secret.bin", b"\x00\x01").await;
    let id = msg["id"].as_i64().unwrap();

    let response = app
        .server
        .get(&format!("/messages/{id}/download/"))
        .authorization_bearer(&carol.token)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let body: Value = response.json();
    assert_eq!(body["detail"], "Not Allowed");
}

#[tokio::test]
async fn download_without_attachment_is_not_found() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;

    let form = MultipartForm::new()
        .add_text("receiver", bob.id.to_string())
        .add_text("text", "no file here");
    let response = app
        .server
        .post("/messages/")
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].as_i64().unwrap();

    // Not found for participants too, regardless of caller.
    for user in [&alice, &bob] {
        let response = app
            .server
            .get(&format!("/messages/{id}/download/"))
            .authorization_bearer(&user.token)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["detail"], "No File");
    }
}

#[tokio::test]
async fn download_of_unknown_message_is_not_found() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;

    let response = app
        .server
        .get("/messages/999/download/")
        .authorization_bearer(&alice.token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn attachment_is_also_served_under_media() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;

    let msg = send_file(&app, &alice, bob.id, "pic.png", b"png bytes").await;
    let file_url = msg["file_url"].as_str().unwrap();
    assert!(file_url.starts_with("/media/uploads/"));

    let response = app.server.get(file_url).await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().to_vec(), b"png bytes".to_vec());
}

#[tokio::test]
async fn edit_can_replace_the_attachment() {
    let app = spawn().await;
    let alice = signup(&app, "alice").await;
    let bob = signup(&app, "bob").await;

    let msg = send_file(&app, &alice, bob.id, "v1.txt", b"first").await;
    let id = msg["id"].as_i64().unwrap();

    let part = Part::bytes(b"second".to_vec()).file_name("v2.txt");
    let form = MultipartForm::new().add_part("file", part);
    let response = app
        .server
        .put(&format!("/messages/{id}/edit/"))
        .authorization_bearer(&alice.token)
        .multipart(form)
        .await;
    response.assert_status_ok();

    let response = app
        .server
        .get(&format!("/messages/{id}/download/"))
        .authorization_bearer(&bob.token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().to_vec(), b"second".to_vec());
}
