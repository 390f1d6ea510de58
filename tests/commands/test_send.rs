//! Tests for the send flow

use httpmock::prelude::*;
use tempfile::TempDir;
use turtle::commands::send;
use turtle::{Config, ConfigStore, Error, CONFIG_FILE};

const TOKEN: &str = "123456:ABC-DEF1234ghIkl";
const SEND_PATH: &str = "/bot123456:ABC-DEF1234ghIkl/sendDocument";

fn configured_store(dir: &TempDir) -> ConfigStore {
    let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
    store.save(&Config::new(TOKEN, 555)).unwrap();
    store
}

#[tokio::test]
async fn test_send_uploads_document() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let store = configured_store(&dir);
    let file = dir.path().join("document.pdf");
    std::fs::write(&file, b"%PDF-1.4 fake").unwrap();

    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path(SEND_PATH)
            .query_param("chat_id", "555")
            .matches(|req| {
                let body = String::from_utf8_lossy(req.body().as_ref()).to_lowercase();
                body.contains("filename=\"document.pdf\"") && body.contains("%pdf-1.4 fake")
            });
        then.status(200).body(r#"{"ok":true,"result":{"message_id":1,"chat":{"id":555}}}"#);
    });

    send::run(&file, &store, &server.base_url()).await.unwrap();

    send_mock.assert_calls(1);
}

#[tokio::test]
async fn test_send_missing_file_fails_before_network() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let store = configured_store(&dir);
    let missing = dir.path().join("missing.txt");

    let send_mock = server.mock(|when, then| {
        when.method(POST).path(SEND_PATH);
        then.status(200);
    });

    let err = send::run(&missing, &store, &server.base_url()).await.unwrap_err();

    assert!(matches!(err, Error::FileNotFound(_)));
    send_mock.assert_calls(0);
}

#[tokio::test]
async fn test_send_forbidden_surfaces_body() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let store = configured_store(&dir);
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hello").unwrap();

    server.mock(|when, then| {
        when.method(POST).path(SEND_PATH);
        then.status(403).body("Forbidden: bot was blocked by the user");
    });

    let err = send::run(&file, &store, &server.base_url()).await.unwrap_err();

    assert!(matches!(err, Error::Api(_)));
    assert!(err.to_string().contains("Forbidden: bot was blocked by the user"));
}

#[tokio::test]
async fn test_send_without_config_is_not_configured() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hello").unwrap();

    let err = send::run(&file, &store, "http://127.0.0.1:9").await.unwrap_err();

    assert!(matches!(err, Error::NotConfigured(_)));
}

#[tokio::test]
async fn test_send_rejects_zero_chat_id() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
    store.save(&Config::new(TOKEN, 0)).unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hello").unwrap();

    let send_mock = server.mock(|when, then| {
        when.method(POST).path(SEND_PATH);
        then.status(200);
    });

    let err = send::run(&file, &store, &server.base_url()).await.unwrap_err();

    assert!(matches!(err, Error::InvalidConfig(_)));
    send_mock.assert_calls(0);
}
