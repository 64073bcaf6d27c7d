//! Startup failures of `run_server`: bad config and an unopenable store are fatal.
//!
//! The tracing subscriber is process-global, so only one test in this binary gets
//! past `validate` into `init_tracing`.

use courier_server::{run_server, ServerConfig};
use tempfile::TempDir;

fn config_in(dir: &TempDir, database_url: String) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url,
        max_connections: 1,
        store_timeout_ms: 1000,
        log_file: dir.path().join("courier-test.log").to_string_lossy().into_owned(),
    }
}

/// **Test: An empty database URL is rejected before anything is opened.**
#[tokio::test]
async fn test_run_server_rejects_empty_database_url() {
    let dir = TempDir::new().unwrap();

    let err = run_server(config_in(&dir, String::new())).await.unwrap_err();

    assert!(err.to_string().contains("DATABASE_URL"), "{:#}", err);
    assert!(!dir.path().join("courier-test.log").exists());
}

/// **Test: A store that cannot be opened stops the server before it binds.**
#[tokio::test]
async fn test_run_server_fails_when_store_cannot_open() {
    let dir = TempDir::new().unwrap();
    let unreachable = dir.path().join("missing").join("sub").join("courier.db");
    let database_url = format!("sqlite://{}", unreachable.display());

    let err = run_server(config_in(&dir, database_url)).await.unwrap_err();

    assert!(
        err.to_string().contains("Failed to open message store"),
        "{:#}",
        err
    );
    assert!(!unreachable.exists());
}
