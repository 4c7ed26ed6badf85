use crate::auth::jwt::AuthService;
use crate::db::DbClient;
use crate::types::{AppError, Result, SignInRequest, SignUpRequest, User};
use std::sync::Arc;

/// User service for all authentication operations.
pub struct UserService {
    db: Arc<DbClient>,
    auth: Arc<AuthService>,
}

impl UserService {
    /// Creates the service over its collaborators.
    pub fn new(db: Arc<DbClient>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Registers a new user.
    ///
    /// Username is checked before email; the first collision wins. The
    /// checks are not transactional with the insert - under concurrent
    /// duplicate registration the storage UNIQUE constraints are the
    /// authoritative guard.
    pub async fn register(&self, request: &SignUpRequest) -> Result<User> {
        if self.db.username_exists(&request.username).await? {
            return Err(AppError::AlreadyExists(format!(
                "Username is already in use: {}",
                request.username
            )));
        }

        if self.db.email_exists(&request.email).await? {
            return Err(AppError::AlreadyExists(format!(
                "Email is already in use: {}",
                request.email
            )));
        }

        let password_hash = self.auth.hash_password(&request.password)?;

        self.db
            .create_user(&request.username, &request.email, &password_hash)
            .await
    }

    /// Authenticates a sign-in and issues a JWT for the username.
    ///
    /// Unknown username and wrong password collapse into the same error so
    /// the response gives no username-enumeration signal.
    pub async fn authenticate(&self, request: &SignInRequest) -> Result<String> {
        let user = self
            .db
            .get_user_by_username(&request.username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self
            .auth
            .verify_password(&request.password, &user.password_hash)?
        {
            return Err(AppError::InvalidCredentials);
        }

        self.auth.issue_token(&user.username)
    }
}
