use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the local database file.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token validity in milliseconds.
    pub jwt_expiration_ms: i64,
}

impl Config {
    /// Loads configuration from the environment (with `.env` support).
    ///
    /// `JWT_SECRET` is required; everything else has a development default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|e| AppError::Internal(format!("Invalid PORT: {}", e)))?,
            },
            database: DatabaseConfig {
                path: env::var("DATABASE_PATH").unwrap_or_else(|_| "tureen.db".to_string()),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| AppError::Internal("JWT_SECRET must be set".to_string()))?,
                jwt_expiration_ms: env::var("JWT_EXPIRATION_MS")
                    .unwrap_or_else(|_| "3600000".to_string())
                    .parse()
                    .map_err(|e| AppError::Internal(format!("Invalid JWT_EXPIRATION_MS: {}", e)))?,
            },
        })
    }
}
