//! # Tureen - Recipe Management API
//!
//! A recipe management REST API with JWT-based authentication. Users register
//! and sign in; authenticated users perform CRUD on recipes, each recipe
//! owning an ordered, non-empty ingredient list.
//!
//! ## Overview
//!
//! Tureen can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `tureen-server` binary
//! 2. **As a library** - Import the services into your own Rust project
//!
//! ### Library Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tureen::{auth::jwt::AuthService, db::DbClient, services::RecipeService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Arc::new(DbClient::open("tureen.db").await?);
//!     let recipes = RecipeService::new(db);
//!
//!     for recipe in recipes.get_all().await? {
//!         println!("{}", recipe.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - JWT authentication and middleware
//! - [`db`] - libsql database client
//! - [`services`] - User and recipe domain services
//! - [`types`] - Common types and error handling
//! - [`validation`] - Explicit per-payload input validation
//!
//! ## Configuration
//!
//! Environment-driven (`.env` supported): `HOST`, `PORT`, `DATABASE_PATH`,
//! `JWT_SECRET` (required), `JWT_EXPIRATION_MS`.

#![warn(missing_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// JWT authentication and middleware.
pub mod auth;
/// Database client (libsql).
pub mod db;
/// Domain services (users, recipes).
pub mod services;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;
/// Input validation returning field-level violations.
pub mod validation;

// Re-export commonly used types
pub use api::create_router;
pub use auth::jwt::AuthService;
pub use db::DbClient;
pub use services::{RecipeService, UserService};
pub use types::{AppError, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<Config>,
    /// Database client
    pub db: Arc<DbClient>,
    /// Token and password service
    pub auth_service: Arc<AuthService>,
    /// Registration and sign-in service
    pub user_service: Arc<UserService>,
    /// Recipe CRUD service
    pub recipe_service: Arc<RecipeService>,
}

impl AppState {
    /// Wires the services from a loaded configuration and an open database.
    pub fn new(config: Config, db: DbClient) -> Self {
        let config = Arc::new(config);
        let db = Arc::new(db);
        let auth_service = Arc::new(AuthService::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_expiration_ms,
        ));
        let user_service = Arc::new(UserService::new(db.clone(), auth_service.clone()));
        let recipe_service = Arc::new(RecipeService::new(db.clone()));

        Self {
            config,
            db,
            auth_service,
            user_service,
            recipe_service,
        }
    }
}
