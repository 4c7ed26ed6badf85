//! Shared test harness: a TestServer over a fresh scratch database.

use axum_test::TestServer;
use tempfile::TempDir;
use tureen::utils::config::{AuthConfig, Config, DatabaseConfig, ServerConfig};
use tureen::{create_router, AppState, DbClient};

pub const TEST_SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

/// Spins up a server over a fresh database with the given auth settings.
/// The returned TempDir must be kept alive for the database file.
pub async fn test_server_with_auth(jwt_secret: &str, jwt_expiration_ms: i64) -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = dir.path().join("test.db");

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            path: db_path.to_string_lossy().into_owned(),
        },
        auth: AuthConfig {
            jwt_secret: jwt_secret.to_string(),
            jwt_expiration_ms,
        },
    };

    let db = DbClient::open(&config.database.path)
        .await
        .expect("should open database");
    let state = AppState::new(config, db);
    let server = TestServer::new(create_router(state)).expect("should start test server");

    (server, dir)
}

pub async fn test_server() -> (TestServer, TempDir) {
    test_server_with_auth(TEST_SECRET, 3_600_000).await
}
