use crate::types::{AppError, Claims, Result, TokenError};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication service for JWT token management and password hashing.
///
/// Provides secure password hashing using Argon2id and JWT token
/// generation/verification using HS512.
pub struct AuthService {
    jwt_secret: String,
    expiration_ms: i64,
}

impl AuthService {
    /// Creates a new AuthService with the given configuration.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for signing JWTs (should be at least 32 chars)
    /// * `expiration_ms` - Token validity in milliseconds
    pub fn new(jwt_secret: String, expiration_ms: i64) -> Self {
        Self {
            jwt_secret,
            expiration_ms,
        }
    }

    /// Hashes a password using Argon2id.
    ///
    /// Returns a PHC-formatted hash string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// Verifies a password against an Argon2 hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Issues a signed token for the given subject, valid for the configured
    /// TTL from now.
    pub fn issue_token(&self, subject: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::milliseconds(self.expiration_ms)).timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Extracts the token substring from a raw `Authorization` header value.
    ///
    /// Pure string operation; performs no validation of the token contents.
    pub fn parse_bearer(header: &str) -> Option<&str> {
        header.strip_prefix(BEARER_PREFIX)
    }

    /// Decodes and verifies a token, returning its claims.
    ///
    /// Signature, structure, and expiry failures are reported as distinct
    /// [`TokenError`] kinds; nothing is swallowed into a boolean.
    pub fn verify_token(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS512);
        // Expiry must be exact for the configured TTL; the crate default
        // allows 60 seconds of leeway.
        validation.leeway = 0;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(token_error)
    }

    /// Returns the subject embedded in a verified token.
    pub fn subject_of(&self, token: &str) -> std::result::Result<String, TokenError> {
        self.verify_token(token).map(|claims| claims.sub)
    }

    /// True iff the token's subject matches `expected_subject` and the token
    /// is not expired. Decode failures propagate as [`TokenError`] rather
    /// than collapsing into `Ok(false)`.
    pub fn is_valid(
        &self,
        token: &str,
        expected_subject: &str,
    ) -> std::result::Result<bool, TokenError> {
        let claims = self.verify_token(token)?;
        Ok(claims.sub == expected_subject)
    }
}

fn token_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => TokenError::Unsupported,
        _ => TokenError::Malformed,
    }
}
