//! Common types and error handling.
//!
//! Domain types ([`User`], [`Recipe`], [`Ingredient`]), request/response
//! payloads, JWT claims, and the crate-wide [`AppError`] taxonomy with its
//! HTTP status mapping.

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Domain Types =============

/// A registered user. Immutable after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2id PHC hash, never the raw password.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// A stored recipe with its cascade-owned ingredient list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    /// Formatted snapshot of the creation instant ("dd-MM-yyyy HH:mm").
    /// Set once at creation, never touched by updates.
    pub creation_time: String,
    pub vegetarian: bool,
    pub serving_capacity: i64,
    /// Ordered, non-empty; replaced wholesale on update.
    pub ingredients: Vec<Ingredient>,
    pub cooking_instructions: String,
    /// Re-stamped on creation and every update.
    pub last_modified: DateTime<Utc>,
}

/// An ingredient owned by its parent recipe. No independent lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
}

// ============= API Request/Response Types =============

/// Client-supplied recipe fields for create and update requests.
/// Ids and timestamps are always generated server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    pub vegetarian: bool,
    pub serving_capacity: i64,
    pub ingredients: Vec<IngredientDraft>,
    pub cooking_instructions: String,
}

/// Client-supplied ingredient fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientDraft {
    pub name: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JwtResponse {
    pub jwt: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ============= Auth Types =============

/// JWT claims: subject (username), issued-at, expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

// ============= Validation Types =============

/// A single field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

// ============= Error Types =============

/// Token decode failures. Kept distinct so the boundary can report the
/// precise cause; never collapsed into a boolean.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Unsupported token format")]
    Unsupported,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Invalid credentials!")]
    InvalidCredentials,

    #[error("Validation failed!")]
    Validation(Vec<FieldViolation>),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    status: u16,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    violations: Option<Vec<FieldViolation>>,
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, violations) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            AppError::AlreadyExists(_) => (StatusCode::CONFLICT, None),
            AppError::Unauthenticated(_) | AppError::Token(_) | AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, None)
            }
            AppError::Validation(violations) => (StatusCode::BAD_REQUEST, Some(violations.clone())),
            // Catch-all maps to 400 rather than 500: every unclassified
            // failure is surfaced to the caller as a client-visible error.
            AppError::Database(_) | AppError::Internal(_) => (StatusCode::BAD_REQUEST, None),
        };

        let body = ErrorBody {
            message: self.to_string(),
            status: status.as_u16(),
            timestamp: Utc::now(),
            violations,
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
