//! JWT Authentication and Middleware
//!
//! Authentication infrastructure for the Tureen API: password hashing, JWT
//! token generation/validation, and the Axum middleware guarding the recipe
//! routes.
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id (memory-hard) for secure password storage
//! - **JWT Tokens**: HS512 signed tokens with configurable expiration
//! - **Stateless**: every request re-validates its bearer token; no sessions
//!
//! # Configuration
//!
//! The signing secret and token TTL come from the environment:
//! ```text
//! JWT_SECRET=...            # required, use a strong random value
//! JWT_EXPIRATION_MS=3600000 # token validity in milliseconds
//! ```

/// JWT token generation, validation, and password hashing services.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
